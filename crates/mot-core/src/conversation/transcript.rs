use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::session::SessionHandle;
use super::turn::{Conversation, Role, Turn};
use crate::error::{MotError, Result};

/// A saved transcript found in the storage directory.
#[derive(Debug, Clone)]
pub struct TranscriptInfo {
    pub handle: SessionHandle,
    pub path: PathBuf,
    pub modified: Option<DateTime<Local>>,
    pub size_bytes: u64,
}

/// Plain-text transcripts, one file per saved session.
///
/// Format: one line per turn, `"<Role>: <content>"`, UTF-8, no escaping.
/// Content holding a newline spills onto extra lines; [`TranscriptStore::load`]
/// folds such lines back into the preceding turn.
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    base_dir: PathBuf,
}

impl TranscriptStore {
    /// Open the store, creating the directory if it does not exist.
    pub fn with_dir(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|e| {
            MotError::storage(format!(
                "Failed to create chat directory {}: {}",
                base_dir.display(),
                e
            ))
        })?;

        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a handle to a path inside the store. Names that would escape
    /// the directory are rejected.
    pub fn path_for(&self, handle: &SessionHandle) -> Result<PathBuf> {
        let name = handle.file_name();
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
            || Path::new(name).is_absolute()
        {
            return Err(MotError::storage(format!("Invalid transcript name: {name:?}")));
        }
        Ok(self.base_dir.join(name))
    }

    /// Write one line per turn, creating or truncating the file.
    pub fn save(&self, conversation: &Conversation, handle: &SessionHandle) -> Result<PathBuf> {
        let path = self.path_for(handle)?;
        let mut writer = BufWriter::new(File::create(&path)?);
        for turn in conversation {
            writeln!(writer, "{}", turn.to_line())?;
        }
        writer.flush()?;

        tracing::info!(
            path = %path.display(),
            turns = conversation.len(),
            "saved transcript"
        );
        Ok(path)
    }

    /// Read a transcript back into a conversation.
    pub fn load(&self, handle: &SessionHandle) -> Result<Conversation> {
        let path = self.path_for(handle)?;
        if !path.exists() {
            return Err(MotError::storage(format!("Transcript not found: {handle}")));
        }
        let contents = fs::read_to_string(&path)?;
        parse_transcript(&contents)
    }

    /// Saved transcripts, most recently modified first.
    pub fn list(&self) -> Result<Vec<TranscriptInfo>> {
        let mut transcripts = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }

            transcripts.push(TranscriptInfo {
                handle: SessionHandle::new(entry.file_name().to_string_lossy()),
                path,
                modified: metadata.modified().ok().map(DateTime::<Local>::from),
                size_bytes: metadata.len(),
            });
        }

        transcripts.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| a.handle.file_name().cmp(b.handle.file_name()))
        });
        Ok(transcripts)
    }
}

/// Rebuild strictly alternating user/assistant pairs from a transcript.
///
/// A label line that would break the alternation is continuation text of the
/// turn before it. A trailing user turn with no reply can only be text the
/// model wrote after its own answer, so it is folded back into that answer.
fn parse_transcript(contents: &str) -> Result<Conversation> {
    let mut turns: Vec<Turn> = Vec::new();

    for line in contents.lines() {
        let expected = match turns.last().map(Turn::role) {
            Some(Role::User) => Role::Assistant,
            _ => Role::User,
        };

        let label = Role::strip_label(line);
        match label {
            Some((role, content)) if role == expected => turns.push(turn_of(role, content)),
            _ => match turns.last_mut() {
                Some(last) => *last = continued(last, line),
                None if label.is_some() => {
                    return Err(MotError::storage(
                        "Transcript does not start with a user turn",
                    ))
                }
                // Text before the first turn carries nothing.
                None => {}
            },
        }
    }

    if turns.len() % 2 == 1 {
        let dangling = turns.pop().map(|turn| turn.to_line());
        match (dangling, turns.last_mut()) {
            (Some(line), Some(last)) => *last = continued(last, &line),
            _ => {
                return Err(MotError::storage(
                    "Transcript holds a user message without a reply",
                ))
            }
        }
    }

    Ok(Conversation::from_turns(turns))
}

fn turn_of(role: Role, content: impl Into<String>) -> Turn {
    match role {
        Role::User => Turn::user(content),
        Role::Assistant => Turn::assistant(content),
    }
}

fn continued(turn: &Turn, line: &str) -> Turn {
    turn_of(turn.role(), format!("{}\n{}", turn.content(), line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_folds_continuation_lines() {
        let conversation = parse_transcript(
            "User: list two things\nAssistant: one\ntwo\nUser: thanks\nAssistant: ok\n",
        )
        .unwrap();

        assert_eq!(conversation.len(), 4);
        assert_eq!(conversation.turns()[1].content(), "one\ntwo");
        assert_eq!(conversation.turns()[3], Turn::assistant("ok"));
    }

    #[test]
    fn test_parse_ignores_leading_noise() {
        let conversation = parse_transcript("stray\nUser: hi\nAssistant: hello\n").unwrap();
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.turns()[0], Turn::user("hi"));
    }

    #[test]
    fn test_parse_folds_out_of_order_labels() {
        let conversation =
            parse_transcript("User: hi\nUser: again\nAssistant: a\nAssistant: b\n").unwrap();

        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.turns()[0], Turn::user("hi\nUser: again"));
        assert_eq!(conversation.turns()[1], Turn::assistant("a\nAssistant: b"));
    }

    #[test]
    fn test_parse_folds_trailing_user_into_reply() {
        let conversation = parse_transcript("User: Hi\nAssistant: Sure.\nUser: thanks\n").unwrap();

        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.turns()[1], Turn::assistant("Sure.\nUser: thanks"));
    }

    #[test]
    fn test_parse_rejects_unpaired_transcripts() {
        assert!(parse_transcript("Assistant: hello\n").is_err());
        assert!(parse_transcript("User: hello\n").is_err());
        assert!(parse_transcript("").unwrap().is_empty());
    }
}
