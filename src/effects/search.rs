//! Literal, case-insensitive search across page sections.

use crate::content::{PageContent, SectionId};
use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};

/// Section text captured once at startup
pub struct SectionIndex {
    sections: Vec<(SectionId, String)>,
}

impl SectionIndex {
    pub fn build(content: &PageContent) -> Self {
        let sections = SectionId::ALL
            .iter()
            .filter(|id| content.has_section(**id))
            .map(|id| (*id, content.section_text(*id)))
            .collect();
        Self { sections }
    }

    /// Sections containing every word of the query, in document order
    pub fn search(&self, query: &str) -> Vec<SectionId> {
        let words: Vec<&str> = query.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }

        let matcher: AhoCorasick = match AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&words)
        {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!("Failed to build search matcher: {}", e);
                return Vec::new();
            }
        };

        self.sections
            .iter()
            .filter(|(_, text)| {
                let mut seen = vec![false; words.len()];
                for m in matcher.find_overlapping_iter(text.as_str()) {
                    seen[m.pattern().as_usize()] = true;
                }
                seen.iter().all(|s| *s)
            })
            .map(|(id, _)| *id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> SectionIndex {
        SectionIndex::build(&PageContent::embedded().unwrap())
    }

    #[test]
    fn test_case_insensitive_match() {
        let idx = index();
        assert_eq!(idx.search("GUMMY / DAY").first(), Some(&SectionId::Dosage));
    }

    #[test]
    fn test_all_words_must_match() {
        let idx = index();
        let hits = idx.search("sugar");
        assert!(!hits.is_empty());
        assert!(idx.search("sugar zzzznotaword").is_empty());
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let idx = index();
        assert!(idx.search("   ").is_empty());
    }

    #[test]
    fn test_missing_sections_are_not_indexed() {
        let content = PageContent::parse(
            r#"
brand = "Tiny"

[[faq]]
question = "Is it sweet?"
answer = "A little."
"#,
        )
        .unwrap();
        let idx = SectionIndex::build(&content);
        assert_eq!(idx.search("sweet"), vec![SectionId::Faq]);
        assert!(idx.search("gummy").is_empty());
    }
}
