use std::io::{self, BufRead, Write};

use crate::client::DEFAULT_BASE_URL;
use crate::config::Config;
use crate::error::{Result, YouTrackError};

fn prompt(stdin: &mut impl BufRead, message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut input = String::new();
    stdin.read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;
    let mut stdin = io::stdin().lock();

    if config_path.exists() {
        let answer = prompt(
            &mut stdin,
            &format!(
                "Config file already exists at {}. Overwrite? [y/N] ",
                config_path.display()
            ),
        )?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("YouTrack CLI Configuration");
    println!("==========================\n");

    let base_url = prompt(
        &mut stdin,
        &format!("YouTrack URL [{DEFAULT_BASE_URL}]: "),
    )?;

    let token = prompt(
        &mut stdin,
        "Enter your permanent token (Profile > Account Security > Tokens): ",
    )?;
    if token.is_empty() {
        return Err(YouTrackError::MissingToken);
    }

    let download_dir = prompt(&mut stdin, "Attachment download directory [downloads]: ")?;

    let contents = render_config(&base_url, &token, &download_dir);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| YouTrackError::ConfigRead {
            path: config_path.clone(),
            source: e,
        })?;
    }

    std::fs::write(&config_path, contents).map_err(|e| YouTrackError::ConfigRead {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'youtrack' commands!");

    Ok(())
}

/// Blank answers are left out so the defaults apply.
fn render_config(base_url: &str, token: &str, download_dir: &str) -> String {
    let mut table = toml::Table::new();
    if !base_url.is_empty() {
        table.insert("base_url".into(), base_url.into());
    }
    table.insert("token".into(), token.into());
    if !download_dir.is_empty() {
        table.insert("download_dir".into(), download_dir.into());
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_config_skips_blank_answers() {
        let rendered = render_config("", "perm:abc", "");
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.token.as_deref(), Some("perm:abc"));
        assert!(parsed.base_url.is_none());
        assert!(parsed.download_dir.is_none());
    }

    #[test]
    fn test_render_config_escapes_quotes() {
        let rendered = render_config("https://x.example/youtrack", "a\"b", "att");
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.token.as_deref(), Some("a\"b"));
        assert_eq!(parsed.base_url.as_deref(), Some("https://x.example/youtrack"));
    }

    #[test]
    fn test_prompt_trims_input() {
        let mut input = io::Cursor::new(b"  y \n".to_vec());
        assert_eq!(prompt(&mut input, "").unwrap(), "y");
    }
}
