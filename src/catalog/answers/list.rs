//! List answers

use serde_json::{json, Value};

use crate::catalog::questions::list as q;
use crate::catalog::{Catalog, CatalogError};
use crate::fault::{Fallible, Fault};
use crate::introspect::tracer;
use crate::unit::{CodeUnit, Origin, SourceFile};
use crate::value::{as_array, contains, elements};
use crate::answer;

static SOURCE: SourceFile = SourceFile::new(file!(), include_str!("list.rs"));
static ROWS: CodeUnit = CodeUnit::new("rows", Origin::BuildingBlocks, &SOURCE);

/// The rows of a list of lists
fn rows(table: &Value) -> Result<Vec<&Vec<Value>>, Fault> {
    tracer::enter(&ROWS);
    as_array(table)?.iter().map(as_array).collect()
}

fn transpose_with_iterators(table: &Value) -> Fallible {
    let rows = rows(table)?;
    let width = rows.iter().map(|row| row.len()).min().unwrap_or(0);
    let columns: Vec<Vec<Value>> = (0..width)
        .map(|column| rows.iter().map(|row| row[column].clone()).collect())
        .collect();
    Ok(json!(columns))
}

fn transpose_by_index(table: &Value) -> Fallible {
    let rows = rows(table)?;
    let width = rows.first().map(|row| row.len()).unwrap_or(0);
    let mut columns = vec![Vec::with_capacity(rows.len()); width];
    for row in &rows {
        if row.len() != width {
            return Err(Fault::Value(format!("ragged row of length {}", row.len())));
        }
        for (column, item) in columns.iter_mut().zip(row.iter()) {
            column.push(item.clone());
        }
    }
    Ok(json!(columns))
}

fn flatten_using_flat_map(lists: &Value) -> Fallible {
    let flat: Vec<Value> = rows(lists)?.into_iter().flatten().cloned().collect();
    Ok(Value::Array(flat))
}

fn flatten_using_extend(lists: &Value) -> Fallible {
    let mut flat = Vec::new();
    for sublist in as_array(lists)? {
        flat.extend(as_array(sublist)?.iter().cloned());
    }
    Ok(Value::Array(flat))
}

fn flatten_to_list_using_flat_map(lists: &Value) -> Fallible {
    let flat = FLATTEN_USING_FLAT_MAP.call(&[lists.clone()])?;
    Ok(Value::Array(elements(&flat)?))
}

fn contains_all_using_loop(container: &Value, contained: &Value) -> Fallible {
    for item in elements(contained)? {
        if !contains(container, &item)? {
            return Ok(json!(false));
        }
    }
    Ok(json!(true))
}

fn contains_all_using_all(container: &Value, contained: &Value) -> Fallible {
    let found = elements(contained)?
        .iter()
        .map(|item| contains(container, item))
        .collect::<Result<Vec<bool>, Fault>>()?;
    Ok(json!(found.into_iter().all(|f| f)))
}

fn is_subset_of(contained: &Value, container: &Value) -> Fallible {
    for item in elements(contained)? {
        if !contains(container, &item)? {
            return Ok(json!(false));
        }
    }
    Ok(json!(true))
}

answer! { pub static TRANSPOSE_WITH_ITERATORS = transpose_with_iterators(table) in SOURCE; }
answer! { pub static TRANSPOSE_BY_INDEX = transpose_by_index(table) in SOURCE; }
answer! { pub static FLATTEN_USING_FLAT_MAP = flatten_using_flat_map(lists) in SOURCE; }
answer! { pub static FLATTEN_USING_EXTEND = flatten_using_extend(lists) in SOURCE; }
answer! { pub static FLATTEN_TO_LIST_USING_FLAT_MAP = flatten_to_list_using_flat_map(lists) in SOURCE; }
answer! { pub static CONTAINS_ALL_USING_LOOP = contains_all_using_loop(container, contained) in SOURCE; }
answer! { pub static CONTAINS_ALL_USING_ALL = contains_all_using_all(container, contained) in SOURCE; }
answer! { pub static IS_SUBSET_OF = is_subset_of(contained, container) in SOURCE; }

pub fn register(catalog: &mut Catalog) -> Result<(), CatalogError> {
    let flattens = [&q::FLATTEN_2D_LIST, &q::FLATTEN_2D_LIST_TO_LIST];
    catalog.add_answer(&TRANSPOSE_WITH_ITERATORS, &[&q::TRANSPOSE])?;
    catalog.add_answer(&TRANSPOSE_BY_INDEX, &[&q::TRANSPOSE])?;
    catalog.add_answer(&FLATTEN_USING_FLAT_MAP, &flattens)?;
    catalog.add_answer(&FLATTEN_USING_EXTEND, &flattens)?;
    catalog.add_answer(&FLATTEN_TO_LIST_USING_FLAT_MAP, &flattens)?;
    catalog.add_answer(&CONTAINS_ALL_USING_LOOP, &[&q::CONTAINS_ALL])?;
    catalog.add_answer(&CONTAINS_ALL_USING_ALL, &[&q::CONTAINS_ALL])?;
    catalog.add_answer(&IS_SUBSET_OF, &[&q::IS_SUBSET_OF])
}
