/// Commit messages follow the convention "CLASSE - NOM Prenom - Content".
/// Parsing never fails: missing segments degrade to placeholder values so a
/// free-form message still renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommitMessage {
    pub classe: String,
    pub name: String,
    pub content: String,
}

const DEFAULT_CLASSE: &str = "Classe";
const DEFAULT_NAME: &str = "Prenom NOM";
const DEFAULT_CONTENT: &str = "Update";

pub fn parse_commit_message(message: &str) -> ParsedCommitMessage {
    let parts: Vec<&str> = message.split(" - ").collect();

    match parts.len() {
        n if n >= 3 => ParsedCommitMessage {
            classe: non_empty(parts[0], DEFAULT_CLASSE),
            name: non_empty(parts[1], DEFAULT_NAME),
            content: non_empty(&parts[2..].join(" - "), DEFAULT_CONTENT),
        },
        2 => ParsedCommitMessage {
            classe: non_empty(parts[0], DEFAULT_CLASSE),
            name: DEFAULT_NAME.to_string(),
            content: non_empty(parts[1], DEFAULT_CONTENT),
        },
        _ => ParsedCommitMessage {
            classe: DEFAULT_CLASSE.to_string(),
            name: DEFAULT_NAME.to_string(),
            content: non_empty(message, DEFAULT_CONTENT),
        },
    }
}

fn non_empty(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
