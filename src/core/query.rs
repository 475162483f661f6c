//! Query-parameter builder.
//!
//! Pure and deterministic: (filters, sort, progress) in, wire parameters
//! out. The orchestrator calls this once per dispatched fetch; nothing in
//! here touches state or I/O.

use crate::core::filters::{SearchFilters, SortSpec};
use crate::core::pagination::{PAGE_SIZE, Progress};

/// Builds the canonical query parameters for the next fetch.
///
/// Offset mode emits `page` and `size`, plus `sort=field,direction` when a
/// sort is set. Cursor mode emits `size` and, once a page has been seen,
/// `cursor`; sort is ignored there because the endpoint has a fixed order.
/// Every non-blank filter field is appended verbatim in both modes.
pub fn build_query(
    filters: &SearchFilters,
    sort: Option<&SortSpec>,
    progress: &Progress,
) -> Vec<(String, String)> {
    let mut params = Vec::new();

    match progress {
        Progress::Offset(p) => {
            params.push(("page".to_string(), p.next_page.to_string()));
            params.push(("size".to_string(), PAGE_SIZE.to_string()));
            if let Some(spec) = sort {
                params.push(("sort".to_string(), spec.query_value()));
            }
        }
        Progress::Cursor(p) => {
            if let Some(cursor) = p.cursor {
                params.push(("cursor".to_string(), cursor.to_string()));
            }
            params.push(("size".to_string(), PAGE_SIZE.to_string()));
        }
    }

    params.extend(filters.params());
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filters::SortDirection;
    use crate::core::pagination::{CursorProgress, OffsetProgress};

    fn pairs(params: &[(String, String)]) -> Vec<(&str, &str)> {
        params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_offset_first_page_without_sort() {
        let params = build_query(
            &SearchFilters::default(),
            None,
            &Progress::Offset(OffsetProgress::default()),
        );
        assert_eq!(pairs(&params), vec![("page", "0"), ("size", "4")]);
    }

    #[test]
    fn test_offset_page_with_sort() {
        let progress = Progress::Offset(OffsetProgress {
            next_page: 3,
            ..Default::default()
        });
        let sort = SortSpec::new("name", SortDirection::Desc);
        let params = build_query(&SearchFilters::default(), Some(&sort), &progress);
        assert_eq!(
            pairs(&params),
            vec![("page", "3"), ("size", "4"), ("sort", "name,desc")]
        );
    }

    #[test]
    fn test_cursor_first_page_omits_cursor_param() {
        let params = build_query(
            &SearchFilters::default(),
            None,
            &Progress::Cursor(CursorProgress::default()),
        );
        assert_eq!(pairs(&params), vec![("size", "4")]);
    }

    #[test]
    fn test_cursor_later_page_includes_token() {
        let progress = Progress::Cursor(CursorProgress {
            cursor: Some(104),
            last: false,
        });
        let params = build_query(&SearchFilters::default(), None, &progress);
        assert_eq!(pairs(&params), vec![("cursor", "104"), ("size", "4")]);
    }

    #[test]
    fn test_cursor_mode_ignores_sort() {
        let sort = SortSpec::new("name", SortDirection::Asc);
        let params = build_query(
            &SearchFilters::default(),
            Some(&sort),
            &Progress::Cursor(CursorProgress::default()),
        );
        assert!(params.iter().all(|(k, _)| k != "sort"));
    }

    #[test]
    fn test_filters_appended_in_both_modes() {
        let filters = SearchFilters {
            department: "CS".to_string(),
            email: String::new(),
            ..Default::default()
        };

        let offset = build_query(&filters, None, &Progress::Offset(OffsetProgress::default()));
        assert!(offset.contains(&("department".to_string(), "CS".to_string())));
        assert!(offset.iter().all(|(k, _)| k != "email"));

        let cursor = build_query(&filters, None, &Progress::Cursor(CursorProgress::default()));
        assert!(cursor.contains(&("department".to_string(), "CS".to_string())));
    }
}
