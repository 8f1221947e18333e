/// Lowercase substrings identifying known client-only mods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Denylist {
    entries: Vec<String>,
}

impl Denylist {
    /// Builds a denylist, normalizing entries to trimmed lowercase and
    /// dropping blanks and duplicates.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for entry in entries {
            let entry = entry.as_ref().trim().to_lowercase();
            if !entry.is_empty() && !normalized.contains(&entry) {
                normalized.push(entry);
            }
        }
        Self {
            entries: normalized,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the first entry contained in either the mod id or the file
    /// name, compared case-insensitively.
    pub fn matches(&self, mod_id: Option<&str>, file_name: &str) -> Option<&str> {
        let mod_id = mod_id.map(str::to_lowercase);
        let file_name = file_name.to_lowercase();

        self.entries
            .iter()
            .find(|entry| {
                mod_id
                    .as_deref()
                    .is_some_and(|id| id.contains(entry.as_str()))
                    || file_name.contains(entry.as_str())
            })
            .map(String::as_str)
    }
}
