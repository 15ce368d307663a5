//! Creation events from directory watching.

use std::path::Path;

use notify::EventKind;
use notify::event::{CreateKind, ModifyKind, RenameMode};

/// A new entry observed in the watched directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationEvent {
    /// How the entry appeared.
    pub kind: CreationKind,

    /// Final path component, if present and valid UTF-8.
    pub name: Option<String>,

    /// Whether the entry is a directory.
    pub is_directory: bool,
}

impl CreationEvent {
    /// Create a new event for a regular entry.
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            kind: CreationKind::Created,
            name: Some(name.into()),
            is_directory: false,
        }
    }

    /// Create a new event for a directory entry.
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            kind: CreationKind::Created,
            name: Some(name.into()),
            is_directory: true,
        }
    }

    /// Whether the event should be forwarded to the matcher.
    pub fn is_candidate(&self) -> bool {
        !self.is_directory && self.name.as_deref().is_some_and(|n| !n.is_empty())
    }

    /// Translate a raw notify event into creation events, one per path.
    ///
    /// Non-creation notifications yield nothing. Rename-into notifications
    /// are only translated when `include_renames` is set.
    pub fn from_notify(event: notify::Event, include_renames: bool) -> Vec<Self> {
        let Some(kind) = CreationKind::classify(event.kind, include_renames) else {
            return Vec::new();
        };

        event
            .paths
            .iter()
            .map(|path| Self {
                kind,
                name: entry_name(path),
                is_directory: is_directory(event.kind, path),
            })
            .collect()
    }
}

/// How a new entry appeared in the watched directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationKind {
    /// Entry was created in place.
    Created,

    /// Entry was renamed into the directory.
    RenamedInto,
}

impl CreationKind {
    fn classify(kind: EventKind, include_renames: bool) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(Self::Created),
            EventKind::Modify(ModifyKind::Name(RenameMode::To)) if include_renames => {
                Some(Self::RenamedInto)
            }
            _ => None,
        }
    }
}

fn entry_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(String::from)
}

fn is_directory(kind: EventKind, path: &Path) -> bool {
    match kind {
        EventKind::Create(CreateKind::Folder) => true,
        EventKind::Create(CreateKind::File) => false,
        // Backends that cannot tell; ask the filesystem.
        _ => path.is_dir(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn raw(kind: EventKind, path: &str) -> notify::Event {
        notify::Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_file_creation_is_candidate() {
        let events = CreationEvent::from_notify(
            raw(EventKind::Create(CreateKind::File), "/dls/wk1_ws_abcd1234_a.pdf"),
            false,
        );

        assert_eq!(events, vec![CreationEvent::file("wk1_ws_abcd1234_a.pdf")]);
        assert!(events[0].is_candidate());
    }

    #[test]
    fn test_folder_creation_is_not_candidate() {
        let events =
            CreationEvent::from_notify(raw(EventKind::Create(CreateKind::Folder), "/dls/sub"), false);

        assert_eq!(events, vec![CreationEvent::directory("sub")]);
        assert!(!events[0].is_candidate());
    }

    #[test]
    fn test_nameless_event_is_not_candidate() {
        let events = CreationEvent::from_notify(raw(EventKind::Create(CreateKind::File), "/"), false);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, None);
        assert!(!events[0].is_candidate());
    }

    #[test]
    fn test_modify_and_remove_are_dropped() {
        let modify = raw(EventKind::Modify(ModifyKind::Any), "/dls/a.txt");
        let remove = raw(EventKind::Remove(notify::event::RemoveKind::File), "/dls/a.txt");

        assert!(CreationEvent::from_notify(modify, true).is_empty());
        assert!(CreationEvent::from_notify(remove, true).is_empty());
    }

    #[test]
    fn test_rename_into_respects_flag() {
        let rename = raw(
            EventKind::Modify(ModifyKind::Name(RenameMode::To)),
            "/nonexistent-coursedrop/wk2_lab_stat2402_x.Rmd",
        );

        assert!(CreationEvent::from_notify(rename.clone(), false).is_empty());

        let events = CreationEvent::from_notify(rename, true);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, CreationKind::RenamedInto);
        assert_eq!(events[0].name.as_deref(), Some("wk2_lab_stat2402_x.Rmd"));
        assert!(events[0].is_candidate());
    }

    #[test]
    fn test_multi_path_event_keeps_order() {
        let event = notify::Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/dls/first"))
            .add_path(PathBuf::from("/dls/second"));

        let names: Vec<_> = CreationEvent::from_notify(event, false)
            .into_iter()
            .filter_map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["first".to_string(), "second".to_string()]);
    }
}
