// # View
//
// A snapshot of everything the user sees, derived from controller state.
// Rendering is plain text so the terminal host and tests share one format.

use crate::notification::Notification;
use phonebook_core::Entry;
use std::fmt;

/// Entries whose name contains `filter`, ignoring case
///
/// An empty filter keeps every entry. Order is preserved.
pub fn filter_entries<'a>(entries: &'a [Entry], filter: &str) -> Vec<&'a Entry> {
    let needle = filter.to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.name.to_lowercase().contains(&needle))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub notification: Option<Notification>,
    pub filter_text: String,
    pub name_input: String,
    pub number_input: String,
    /// Question awaiting yes/no, if any
    pub prompt: Option<String>,
    /// Entries passing the filter
    pub rows: Vec<Entry>,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Phonebook")?;
        if let Some(notification) = &self.notification {
            writeln!(f, "[{}] {}", notification.kind, notification.text)?;
        }
        writeln!(f, "filter shown with: {}", self.filter_text)?;
        writeln!(f, "Add a new")?;
        writeln!(f, "name: {}", self.name_input)?;
        writeln!(f, "number: {}", self.number_input)?;
        writeln!(f, "Numbers")?;
        for entry in &self.rows {
            writeln!(f, "  [{}] {} {}", entry.id, entry.name, entry.number)?;
        }
        if let Some(prompt) = &self.prompt {
            writeln!(f, "{} (yes/no)", prompt)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::NotificationKind;
    use phonebook_core::seed_entries;

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let entries = seed_entries();

        let names: Vec<&str> = filter_entries(&entries, "ada")
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(names, vec!["Ada Lovelace"]);

        assert_eq!(filter_entries(&entries, "A").len(), 4);
        assert_eq!(filter_entries(&entries, "").len(), 4);
        assert!(filter_entries(&entries, "zzz").is_empty());
    }

    #[test]
    fn test_render() {
        let view = View {
            notification: Some(Notification {
                text: "Added Alice".to_string(),
                kind: NotificationKind::Success,
                token: 1,
            }),
            filter_text: "ada".to_string(),
            name_input: String::new(),
            number_input: String::new(),
            prompt: None,
            rows: vec![Entry::new(2, "Ada Lovelace", "39-44-5323523")],
        };

        let text = view.to_string();
        assert!(text.starts_with("Phonebook\n[success] Added Alice\n"));
        assert!(text.contains("filter shown with: ada\n"));
        assert!(text.contains("  [2] Ada Lovelace 39-44-5323523\n"));
        assert!(!text.contains("(yes/no)"));
    }
}
