//! Field order of execution results.
//!
//! async-graphql inserts object fields as their resolvers complete, so the
//! keys of `Response.data` can come out in any order. Results are put back
//! in the order the query selected them.

use async_graphql::parser::types::{
    DocumentOperations, ExecutableDocument, FragmentDefinition, Selection, SelectionSet,
};
use async_graphql::parser::Positioned;
use async_graphql::{Name, Value};
use std::collections::{HashMap, HashSet};

type Fragments = HashMap<Name, Positioned<FragmentDefinition>>;

/// Response keys of an object, in selection order, each with the
/// sub-selections that apply to its value.
type OrderedKeys<'a> = Vec<(&'a Name, Vec<&'a SelectionSet>)>;

/// Reorder `data` to follow the selection order of the operation that ran.
///
/// Leaves `data` untouched when the document does not parse or the operation
/// cannot be identified.
pub fn restore_selection_order(data: &mut Value, query: &str, operation_name: Option<&str>) {
    if !matches!(data, Value::Object(_)) {
        return;
    }
    let Ok(document) = async_graphql::parser::parse_query(query) else {
        return;
    };
    if let Some(selection_set) = operation_selection(&document, operation_name) {
        reorder(data, &[selection_set], &document.fragments);
    }
}

fn operation_selection<'a>(
    document: &'a ExecutableDocument,
    operation_name: Option<&str>,
) -> Option<&'a SelectionSet> {
    match &document.operations {
        DocumentOperations::Single(operation) => Some(&operation.node.selection_set.node),
        DocumentOperations::Multiple(operations) => match operation_name {
            Some(name) => operations
                .iter()
                .find(|(op_name, _)| op_name.as_str() == name)
                .map(|(_, operation)| &operation.node.selection_set.node),
            None if operations.len() == 1 => operations
                .values()
                .next()
                .map(|operation| &operation.node.selection_set.node),
            None => None,
        },
    }
}

fn collect_keys<'a>(
    selection_set: &'a SelectionSet,
    fragments: &'a Fragments,
    visited: &mut HashSet<&'a Name>,
    keys: &mut OrderedKeys<'a>,
) {
    for selection in &selection_set.items {
        match &selection.node {
            Selection::Field(field) => {
                let key = &field.node.response_key().node;
                let children = &field.node.selection_set.node;
                match keys.iter_mut().find(|(existing, _)| *existing == key) {
                    Some((_, sets)) => sets.push(children),
                    None => keys.push((key, vec![children])),
                }
            }
            Selection::FragmentSpread(spread) => {
                let name = &spread.node.fragment_name.node;
                if !visited.insert(name) {
                    continue;
                }
                if let Some(fragment) = fragments.get(name) {
                    collect_keys(&fragment.node.selection_set.node, fragments, visited, keys);
                }
            }
            Selection::InlineFragment(inline) => {
                collect_keys(&inline.node.selection_set.node, fragments, visited, keys);
            }
        }
    }
}

fn reorder(value: &mut Value, selection_sets: &[&SelectionSet], fragments: &Fragments) {
    match value {
        Value::Object(map) => {
            let mut keys = OrderedKeys::new();
            let mut visited = HashSet::new();
            for selection_set in selection_sets {
                collect_keys(selection_set, fragments, &mut visited, &mut keys);
            }

            let mut rest = std::mem::take(map);
            for (key, _) in &keys {
                if let Some((name, field)) = rest.shift_remove_entry(*key) {
                    map.insert(name, field);
                }
            }
            map.extend(rest);

            for (key, children) in &keys {
                if let Some(field) = map.get_mut(*key) {
                    reorder(field, children, fragments);
                }
            }
        }
        Value::List(items) => {
            for item in items {
                reorder(item, selection_sets, fragments);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(fields: Vec<(&str, Value)>) -> Value {
        Value::Object(
            fields
                .into_iter()
                .map(|(name, value)| (Name::new(name), value))
                .collect(),
        )
    }

    fn string(value: &str) -> Value {
        Value::String(value.to_string())
    }

    fn encoded(value: &Value) -> String {
        serde_json::to_string(value).unwrap()
    }

    #[test]
    fn restores_top_level_order() {
        let mut data = object(vec![("c", string("3")), ("a", string("1")), ("b", string("2"))]);

        restore_selection_order(&mut data, "{ a b c }", None);

        assert_eq!(encoded(&data), r#"{"a":"1","b":"2","c":"3"}"#);
    }

    #[test]
    fn follows_aliases_and_fragments() {
        let mut data = object(vec![
            ("shared", string("s")),
            ("second", string("2")),
            ("first", string("1")),
        ]);

        restore_selection_order(
            &mut data,
            "query Q { first: test, ...rest } fragment rest on QueryRoot { second: test ... on QueryRoot { shared } }",
            Some("Q"),
        );

        assert_eq!(encoded(&data), r#"{"first":"1","second":"2","shared":"s"}"#);
    }

    #[test]
    fn reorders_nested_objects_and_lists() {
        let mut data = object(vec![(
            "items",
            Value::List(vec![
                object(vec![("b", string("x")), ("a", string("y"))]),
                object(vec![("b", string("z")), ("a", string("w"))]),
            ]),
        )]);

        restore_selection_order(&mut data, "{ items { a b } }", None);

        assert_eq!(
            encoded(&data),
            r#"{"items":[{"a":"y","b":"x"},{"a":"w","b":"z"}]}"#
        );
    }

    #[test]
    fn picks_the_named_operation() {
        let mut data = object(vec![("b", string("2")), ("a", string("1"))]);

        restore_selection_order(&mut data, "query X { b a } query Y { a b }", Some("Y"));

        assert_eq!(encoded(&data), r#"{"a":"1","b":"2"}"#);
    }

    #[test]
    fn leaves_data_alone_when_query_does_not_parse() {
        let mut data = object(vec![("b", string("2")), ("a", string("1"))]);

        restore_selection_order(&mut data, "{ a b", None);

        assert_eq!(encoded(&data), r#"{"b":"2","a":"1"}"#);
    }
}
