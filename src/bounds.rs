//! Best-known costs of the `gdb` benchmark set.
//!
//! All 23 values are proven optima.
//!
//! # Reference
//!
//! Golden, B.L., DeArmon, J.S. & Baker, E.K. (1983). "Computational
//! experiments with algorithms for a class of routing problems", *Computers &
//! Operations Research* 10(1), 47-59.

const GDB: [(&str, u32); 23] = [
    ("gdb1", 316),
    ("gdb2", 339),
    ("gdb3", 275),
    ("gdb4", 287),
    ("gdb5", 377),
    ("gdb6", 298),
    ("gdb7", 325),
    ("gdb8", 348),
    ("gdb9", 303),
    ("gdb10", 275),
    ("gdb11", 395),
    ("gdb12", 458),
    ("gdb13", 538),
    ("gdb14", 100),
    ("gdb15", 58),
    ("gdb16", 127),
    ("gdb17", 91),
    ("gdb18", 164),
    ("gdb19", 55),
    ("gdb20", 121),
    ("gdb21", 156),
    ("gdb22", 200),
    ("gdb23", 233),
];

/// Returns the best-known cost of a benchmark instance, matched
/// case-insensitively by name.
///
/// # Examples
///
/// ```
/// use carp_routing::bounds::best_known;
///
/// assert_eq!(best_known("gdb1"), Some(316.0));
/// assert_eq!(best_known("GDB23"), Some(233.0));
/// assert_eq!(best_known("egl-e1-a"), None);
/// ```
pub fn best_known(name: &str) -> Option<f64> {
    GDB.iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, cost)| f64::from(cost))
}
