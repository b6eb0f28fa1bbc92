//! Dictionary answers

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde_json::{json, Value};

use super::math::IS_EVEN;
use crate::catalog::questions::dict as q;
use crate::catalog::{Catalog, CatalogError};
use crate::fault::Fallible;
use crate::unit::SourceFile;
use crate::value::{as_array, as_object, compare, loose_eq, modulo, truthy};
use crate::answer;

static SOURCE: SourceFile = SourceFile::new(file!(), include_str!("dict.rs"));

fn items_sorted_by_key(d: &Value) -> Fallible {
    let mut items: Vec<(&String, &Value)> = as_object(d)?.iter().collect();
    items.sort_by(|a, b| a.0.cmp(b.0));
    Ok(json!(items))
}

fn items_sorted_by_key_using_btree(d: &Value) -> Fallible {
    let sorted: BTreeMap<&String, &Value> = as_object(d)?.iter().collect();
    Ok(json!(sorted.into_iter().collect::<Vec<_>>()))
}

fn items_sorted_by_value(d: &Value) -> Fallible {
    let mut items: Vec<(&String, &Value)> = as_object(d)?.iter().collect();
    let mut failure = None;
    items.sort_by(|a, b| {
        compare(a.1, b.1).unwrap_or_else(|fault| {
            failure.get_or_insert(fault);
            Ordering::Equal
        })
    });
    match failure {
        Some(fault) => Err(fault),
        None => Ok(json!(items)),
    }
}

fn group_by_parity_using_is_even(numbers: &Value) -> Fallible {
    let mut groups: BTreeMap<&str, Vec<Value>> = BTreeMap::new();
    for n in as_array(numbers)? {
        let key = if truthy(&IS_EVEN.call(&[n.clone()])?) { "even" } else { "odd" };
        groups.entry(key).or_default().push(n.clone());
    }
    Ok(json!(groups))
}

fn group_by_parity_with_modulo(numbers: &Value) -> Fallible {
    let mut groups: BTreeMap<&str, Vec<Value>> = BTreeMap::new();
    for n in as_array(numbers)? {
        let even = loose_eq(&modulo(n, &json!(2))?, &json!(0));
        groups.entry(if even { "even" } else { "odd" }).or_default().push(n.clone());
    }
    Ok(json!(groups))
}

answer! { pub static ITEMS_SORTED_BY_KEY = items_sorted_by_key(d) in SOURCE; }
answer! { pub static ITEMS_SORTED_BY_KEY_USING_BTREE = items_sorted_by_key_using_btree(d) in SOURCE; }
answer! { pub static ITEMS_SORTED_BY_VALUE = items_sorted_by_value(d) in SOURCE; }
answer! { pub static GROUP_BY_PARITY_USING_IS_EVEN = group_by_parity_using_is_even(numbers) in SOURCE; }
answer! { pub static GROUP_BY_PARITY_WITH_MODULO = group_by_parity_with_modulo(numbers) in SOURCE; }

pub fn register(catalog: &mut Catalog) -> Result<(), CatalogError> {
    catalog.add_answer(&ITEMS_SORTED_BY_KEY, &[&q::SORT_DICT_ITEMS_BY_KEY])?;
    catalog.add_answer(&ITEMS_SORTED_BY_KEY_USING_BTREE, &[&q::SORT_DICT_ITEMS_BY_KEY])?;
    catalog.add_answer(&ITEMS_SORTED_BY_VALUE, &[&q::SORT_DICT_ITEMS_BY_VALUE])?;
    catalog.add_answer(&GROUP_BY_PARITY_USING_IS_EVEN, &[&q::GROUP_BY_PARITY])?;
    catalog.add_answer(&GROUP_BY_PARITY_WITH_MODULO, &[&q::GROUP_BY_PARITY])
}
