//! Partial-section materializer — carves a section down to a subset of its
//! items when the assignment algorithm splits it across a page boundary.

use std::ops::Range;

use crate::models::Section;

/// Produces a new section carrying only the items in `range`, preserving
/// identity (`id`, `title`, `order`, type) so templates render it exactly
/// like the original. `continuation` is true for every placement of the
/// section after its first; it suppresses the title so a split section is
/// titled once across the whole document. The source section is never
/// mutated.
pub fn partial_section(section: &Section, range: Range<usize>, continuation: bool) -> Section {
    Section {
        id: section.id.clone(),
        title: section.title.clone(),
        enabled: section.enabled,
        order: section.order,
        hide_title: continuation || section.hide_title,
        content: section.content.slice(range),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SectionContent, WorkExperience};

    fn make_section(items: usize) -> Section {
        Section {
            id: "experience".to_string(),
            title: "Experience".to_string(),
            enabled: true,
            order: 2,
            hide_title: false,
            content: SectionContent::Experience(
                (0..items)
                    .map(|i| WorkExperience {
                        company: format!("Co {i}"),
                        role: "Engineer".to_string(),
                        start: None,
                        end: None,
                        location: None,
                        bullets: vec![],
                    })
                    .collect(),
            ),
        }
    }

    #[test]
    fn test_preserves_identity_fields() {
        let section = make_section(3);
        let partial = partial_section(&section, 0..2, false);

        assert_eq!(partial.id, section.id);
        assert_eq!(partial.title, section.title);
        assert_eq!(partial.order, section.order);
        assert!(!partial.hide_title, "first placement keeps its title");
        assert_eq!(partial.content.item_count(), Some(2));
    }

    #[test]
    fn test_continuation_suppresses_title() {
        let section = make_section(3);
        let partial = partial_section(&section, 2..3, true);
        assert!(partial.hide_title);
    }

    #[test]
    fn test_user_hidden_title_stays_hidden() {
        let mut section = make_section(2);
        section.hide_title = true;
        let partial = partial_section(&section, 0..1, false);
        assert!(
            partial.hide_title,
            "a user-hidden title is not resurfaced by splitting"
        );
    }

    #[test]
    fn test_source_section_untouched() {
        let section = make_section(3);
        let _ = partial_section(&section, 1..3, true);
        assert_eq!(section.content.item_count(), Some(3));
        assert!(!section.hide_title);
    }

    #[test]
    fn test_carves_requested_index_range() {
        let section = make_section(4);
        let partial = partial_section(&section, 1..3, true);
        match partial.content {
            SectionContent::Experience(items) => {
                assert_eq!(items[0].company, "Co 1");
                assert_eq!(items[1].company, "Co 2");
            }
            other => panic!("expected Experience, got {other:?}"),
        }
    }
}
