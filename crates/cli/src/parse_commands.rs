//! `formrelay parse`: run the message parser over a file or stdin.

use std::{io::Read, path::Path};

use anyhow::{Context, Result};

pub fn handle_parse(file: Option<&Path>) -> Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        },
    };

    match render(&text)? {
        Ok(json) => {
            println!("{json}");
            Ok(())
        },
        Err(diagnostic) => {
            eprintln!("{diagnostic}");
            std::process::exit(1);
        },
    }
}

/// Pretty JSON for a valid message, or the diagnostic for an invalid one.
fn render(text: &str) -> Result<std::result::Result<String, String>> {
    Ok(match formrelay_parser::parse(text) {
        Ok(request) => Ok(serde_json::to_string_pretty(&request)?),
        Err(e) => Err(e.to_string()),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn renders_request_as_json() {
        let json = render("Reason: Taxi\nAmount: 12\nDeadline: Friday\nNote: none")
            .unwrap()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["Reason"], "Taxi");
        assert_eq!(value["Amount"], "12");
        assert_eq!(value["Deadline"], "Friday");
        assert_eq!(value["Note"], "none");
    }

    #[test]
    fn renders_diagnostic() {
        let diagnostic = render("Reason: x\nAmount: y\nDeadline: z").unwrap().unwrap_err();
        assert_eq!(
            diagnostic,
            "Message must contain at least 4 lines for Reason, Amount, Deadline, and Note."
        );
    }

    #[test]
    fn file_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("msg.txt");
        std::fs::write(&path, "Reason: a\nAmount: b\nDeadline: c\nNote: d\n").unwrap();
        handle_parse(Some(&path)).unwrap();
    }

    #[test]
    fn missing_file_is_error() {
        assert!(handle_parse(Some(Path::new("/nonexistent/formrelay-msg.txt"))).is_err());
    }
}
