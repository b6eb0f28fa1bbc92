//! Arithmetic answers

use serde_json::{json, Value};

use crate::catalog::questions::math as q;
use crate::catalog::{Catalog, CatalogError};
use crate::fault::Fallible;
use crate::unit::SourceFile;
use crate::value::{as_i64, loose_eq, modulo};
use crate::answer;

static SOURCE: SourceFile = SourceFile::new(file!(), include_str!("math.rs"));

fn is_divisible_by(a: &Value, b: &Value) -> Fallible {
    Ok(json!(loose_eq(&modulo(a, b)?, &json!(0))))
}

fn is_even(a: &Value) -> Fallible {
    IS_DIVISIBLE_BY.call(&[a.clone(), json!(2)])
}

fn gcd_euclid(a: &Value, b: &Value) -> Fallible {
    let (mut a, mut b) = (as_i64(a)?, as_i64(b)?);
    while b != 0 {
        (a, b) = (b, a % b);
    }
    Ok(json!(a.abs()))
}

fn gcd_recursive(a: &Value, b: &Value) -> Fallible {
    fn euclid(a: i64, b: i64) -> i64 {
        if b == 0 {
            a.abs()
        } else {
            euclid(b, a % b)
        }
    }
    Ok(json!(euclid(as_i64(a)?, as_i64(b)?)))
}

fn lcm_via_gcd(a: &Value, b: &Value) -> Fallible {
    let (x, y) = (as_i64(a)?, as_i64(b)?);
    if x == 0 || y == 0 {
        return Ok(json!(0));
    }
    let divisor = as_i64(&GCD_EUCLID.call(&[a.clone(), b.clone()])?)?;
    Ok(json!((x / divisor * y).abs()))
}

answer! { pub static IS_DIVISIBLE_BY = is_divisible_by(a, b) in SOURCE; }
answer! { pub static IS_EVEN = is_even(a) in SOURCE; }
answer! { pub static GCD_EUCLID = gcd_euclid(a, b) in SOURCE; }
answer! { pub static GCD_RECURSIVE = gcd_recursive(a, b) in SOURCE; }
answer! { pub static LCM_VIA_GCD = lcm_via_gcd(a, b) in SOURCE; }

pub fn register(catalog: &mut Catalog) -> Result<(), CatalogError> {
    catalog.add_answer(&IS_DIVISIBLE_BY, &[&q::IS_DIVISIBLE_BY])?;
    catalog.add_answer(&IS_EVEN, &[&q::IS_EVEN])?;
    catalog.add_answer(&GCD_EUCLID, &[&q::GREATEST_COMMON_DIVISOR])?;
    catalog.add_answer(&GCD_RECURSIVE, &[&q::GREATEST_COMMON_DIVISOR])?;
    catalog.add_answer(&LCM_VIA_GCD, &[&q::LEAST_COMMON_MULTIPLE])
}
