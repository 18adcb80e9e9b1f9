//! Reader for the keyword instance format.
//!
//! ```text
//! NOMBRE : gdb1
//! VERTICES : 12
//! CAPACIDAD : 5
//! LISTA_ARISTAS_REQ :
//! ( 1, 2)  coste 13  demanda 1
//! ...
//! LISTA_ARISTAS_NO_REQ :
//! ( 3, 9)  coste 4
//! DEPOSITO : 1
//! ```
//!
//! Header lines are `KEY : value`. Inside an edge list every line contributes
//! the unsigned integers it contains, in order: `u v cost demand` for
//! required edges, `u v cost` for the others. Lines with too few integers are
//! skipped, and a required line with zero demand is read as a plain edge.

use crate::error::{CarpError, Result};
use crate::models::{Instance, InstanceBuilder};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Header,
    Required,
    NonRequired,
}

/// Parses an instance from its text.
///
/// The name is lowercased, and a `gdbN` prefix, when present, becomes the
/// whole name so that it matches the best-known table.
///
/// # Examples
///
/// ```
/// use carp_routing::io::parse_instance;
///
/// let text = "NOMBRE : GDB1.dat\nVERTICES : 3\nCAPACIDAD : 5\n\
///             LISTA_ARISTAS_REQ :\n( 1, 2) coste 4 demanda 2\n\
///             LISTA_ARISTAS_NO_REQ :\n( 2, 3) coste 1\nDEPOSITO : 1\n";
/// let inst = parse_instance(text).unwrap();
/// assert_eq!(inst.name(), "gdb1");
/// assert_eq!(inst.num_required(), 1);
/// assert_eq!(inst.distance(1, 3), 5.0);
/// ```
pub fn parse_instance(text: &str) -> Result<Instance> {
    let mut name = None;
    let mut num_vertices = None;
    let mut capacity = None;
    let mut depot = None;
    let mut required: Vec<(usize, usize, f64, i32)> = Vec::new();
    let mut plain: Vec<(usize, usize, f64)> = Vec::new();
    let mut section = Section::Header;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((key, value)) = header(line) {
            let value = value.trim();
            match key.as_str() {
                "NOMBRE" => name = Some(normalize_name(value)),
                "VERTICES" => num_vertices = Some(header_value(value, line_no)?),
                "CAPACIDAD" => capacity = Some(header_value(value, line_no)?),
                "DEPOSITO" => depot = Some(header_value(value, line_no)?),
                k if k.starts_with("LISTA_ARISTAS_NO_REQ") => section = Section::NonRequired,
                k if k.starts_with("LISTA_ARISTAS_REQ") => section = Section::Required,
                _ => {}
            }
            continue;
        }

        let nums = integers(line, line_no)?;
        match section {
            Section::Required if nums.len() >= 4 => {
                let (u, v) = (narrow(nums[0], line_no)?, narrow(nums[1], line_no)?);
                let cost = nums[2] as f64;
                let demand: i32 = narrow(nums[3], line_no)?;
                if demand > 0 {
                    required.push((u, v, cost, demand));
                } else {
                    plain.push((u, v, cost));
                }
            }
            Section::NonRequired if nums.len() >= 3 => {
                let (u, v) = (narrow(nums[0], line_no)?, narrow(nums[1], line_no)?);
                plain.push((u, v, nums[2] as f64));
            }
            _ => {}
        }
    }

    let name = name.ok_or(CarpError::MissingField("NOMBRE"))?;
    let num_vertices = num_vertices.ok_or(CarpError::MissingField("VERTICES"))?;
    let capacity = capacity.ok_or(CarpError::MissingField("CAPACIDAD"))?;
    let depot = depot.ok_or(CarpError::MissingField("DEPOSITO"))?;

    let mut builder = InstanceBuilder::new(name, num_vertices, depot, capacity);
    for (u, v, cost, demand) in required {
        builder = builder.required_edge(u, v, cost, demand);
    }
    for (u, v, cost) in plain {
        builder = builder.edge(u, v, cost);
    }
    builder.build()
}

/// Splits `KEY : value` when the key is an upper-case keyword.
fn header(line: &str) -> Option<(String, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim().to_ascii_uppercase();
    let is_keyword =
        !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    is_keyword.then_some((key, value))
}

fn normalize_name(value: &str) -> String {
    let name = value
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();
    let digits = name
        .strip_prefix("gdb")
        .map(|rest| rest.chars().take_while(char::is_ascii_digit).count())
        .unwrap_or(0);
    if digits > 0 {
        name[..3 + digits].to_string()
    } else {
        name
    }
}

/// Every run of ASCII digits in the line, in order.
fn integers(line: &str, line_no: usize) -> Result<Vec<u64>> {
    line.split(|c: char| !c.is_ascii_digit())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>().map_err(|e| CarpError::Parse {
                line: line_no,
                message: format!("{s}: {e}"),
            })
        })
        .collect()
}

/// First integer of a header value.
fn header_value<T: TryFrom<u64>>(value: &str, line_no: usize) -> Result<T> {
    let n = integers(value, line_no)?
        .first()
        .copied()
        .ok_or_else(|| CarpError::Parse {
            line: line_no,
            message: format!("expected an integer, found {value:?}"),
        })?;
    narrow(n, line_no)
}

fn narrow<T: TryFrom<u64>>(n: u64, line_no: usize) -> Result<T> {
    T::try_from(n).map_err(|_| CarpError::Parse {
        line: line_no,
        message: format!("{n} out of range"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
NOMBRE : gdb19
COMENTARIO : 55 (cota superior)
VERTICES : 4
ARISTAS_REQ : 3
ARISTAS_NOREQ : 1
VEHICULOS : 2
CAPACIDAD : 6
TIPO_COSTES_ARISTAS : EXPLICITOS
COSTE_TOTAL_REQ : 7
LISTA_ARISTAS_REQ :
( 1, 2)   coste 2   demanda 3
( 2, 3)   coste 3   demanda 2
( 3, 4)   coste 2   demanda 0
LISTA_ARISTAS_NO_REQ :
( 4, 1)   coste 1
DEPOSITO :   1
";

    #[test]
    fn test_parse_sample() {
        let inst = parse_instance(SAMPLE).expect("valid");
        assert_eq!(inst.name(), "gdb19");
        assert_eq!(inst.num_vertices(), 4);
        assert_eq!(inst.capacity(), 6);
        assert_eq!(inst.depot(), 1);
        // Zero-demand line is a plain edge.
        assert_eq!(inst.num_required(), 2);
        assert_eq!(inst.demand(3, 2), Some(2));
        assert!((inst.distance(1, 3) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_name_normalization() {
        assert_eq!(normalize_name("GDB12.dat"), "gdb12");
        assert_eq!(normalize_name("gdb"), "gdb");
        assert_eq!(normalize_name("Egl-E1-A extra"), "egl-e1-a");
    }

    #[test]
    fn test_missing_field() {
        let text = SAMPLE.replace("CAPACIDAD : 6\n", "");
        assert!(matches!(
            parse_instance(&text),
            Err(CarpError::MissingField("CAPACIDAD"))
        ));
    }

    #[test]
    fn test_bad_header_value() {
        let text = SAMPLE.replace("VERTICES : 4", "VERTICES : many");
        assert!(matches!(
            parse_instance(&text),
            Err(CarpError::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn test_demand_over_capacity_reported() {
        let text = SAMPLE.replace("demanda 3", "demanda 9");
        assert!(matches!(
            parse_instance(&text),
            Err(CarpError::DemandExceedsCapacity { demand: 9, .. })
        ));
    }

    #[test]
    fn test_unreachable_endpoint() {
        // Only 1-2 and 3-4 remain, so 3 and 4 cannot be reached.
        let text = SAMPLE.replace("( 2, 3)   coste 3", "( 3, 4)   coste 3");
        let text = text.replace("( 3, 4)   coste 2   demanda 0\n", "");
        let text = text.replace("( 4, 1)   coste 1\n", "");
        assert!(matches!(
            parse_instance(&text),
            Err(CarpError::Unreachable { .. })
        ));
    }
}
