//! Parsing of the string-concatenated list columns.

use crate::model::NodeId;

use super::error::LoadError;
use super::source::Table;

/// Trims a raw field and maps SQL null markers to `None`.
pub(crate) fn clean(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "NULL" && *v != "\\N")
}

/// Splits a list column on any of the separators, dropping empty tokens.
pub(crate) fn split_list<'a>(
    raw: Option<&'a str>,
    separators: &'a [char],
) -> impl Iterator<Item = &'a str> + 'a {
    clean(raw)
        .into_iter()
        .flat_map(move |s| s.split(move |c: char| separators.contains(&c)))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Parses a list column of node ids, keeping order and repeats.
pub(crate) fn parse_node_ids(
    raw: Option<&str>,
    separators: &[char],
    table: &Table,
    row: usize,
) -> Result<Vec<NodeId>, LoadError> {
    split_list(raw, separators)
        .map(|token| parse_node_id(token, table, row))
        .collect()
}

/// Parses a single required node id column.
pub(crate) fn parse_node_id(token: &str, table: &Table, row: usize) -> Result<NodeId, LoadError> {
    token
        .parse::<NodeId>()
        .map_err(|_| LoadError::InvalidNodeId {
            table: table.clone(),
            row,
            value: token.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEPS: &[char] = &[',', ' '];

    #[test]
    fn test_clean() {
        assert_eq!(clean(Some("  MP:1 ")), Some("MP:1"));
        assert_eq!(clean(Some("")), None);
        assert_eq!(clean(Some("NULL")), None);
        assert_eq!(clean(Some("\\N")), None);
        assert_eq!(clean(None), None);
    }

    #[test]
    fn test_split_list_mixed_separators() {
        let tokens: Vec<&str> = split_list(Some("1,2 3,, 4 "), SEPS).collect();
        assert_eq!(tokens, vec!["1", "2", "3", "4"]);
        assert_eq!(split_list(Some("NULL"), SEPS).count(), 0);
    }

    #[test]
    fn test_parse_node_ids() {
        let ids = parse_node_ids(Some("10 4 10"), SEPS, &Table::Fullpath, 1).unwrap();
        assert_eq!(ids, vec![NodeId(10), NodeId(4), NodeId(10)]);
    }

    #[test]
    fn test_parse_node_ids_rejects_garbage() {
        let err = parse_node_ids(Some("1,MP:2"), SEPS, &Table::Terms, 7).unwrap_err();
        match err {
            LoadError::InvalidNodeId { row, value, .. } => {
                assert_eq!(row, 7);
                assert_eq!(value, "MP:2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
