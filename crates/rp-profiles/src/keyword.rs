//! Summary keyword classification.
//!
//! Keywords follow the simulator convention: the first letter names the
//! owner class (`W`ell, `G`roup, `F`ield, `B` cell, `C` connection) and an
//! `L` prefix marks local grid refinement variants. All checks trim their
//! input first.

fn body(keyword: &str) -> &str {
    keyword.trim()
}

/// Keyword with any LGR `L` prefix removed.
fn unprefixed(keyword: &str) -> &str {
    let k = body(keyword);
    k.strip_prefix('L').unwrap_or(k)
}

fn slice(k: &str, from: usize, to: usize) -> &str {
    k.get(from..to.min(k.len())).unwrap_or("")
}

pub fn is_well(keyword: &str) -> bool {
    let k = body(keyword);
    k.starts_with('W') || k.starts_with("LW")
}

pub fn is_group(keyword: &str) -> bool {
    body(keyword).starts_with('G')
}

pub fn is_field(keyword: &str) -> bool {
    body(keyword).starts_with('F')
}

/// Production, surface, injection or flow rate keyword (`WOPR`, `GGIR`, ...).
pub fn is_rate(keyword: &str) -> bool {
    matches!(slice(unprefixed(keyword), 2, 4), "PR" | "SR" | "IR" | "FR")
}

/// Cumulative keyword (`WOPT`, `FGIT`, ...). Water cut and `MONTH` are excluded.
pub fn is_cumulative(keyword: &str) -> bool {
    let full = body(keyword);
    if full == "MONTH" {
        return false;
    }
    let k = unprefixed(keyword);
    if slice(k, 1, 4) == "WCT" {
        return false;
    }
    slice(k, 3, 4) == "T" && slice(k, 2, 4) != "IP"
}

pub fn is_cell(keyword: &str) -> bool {
    unprefixed(keyword).starts_with('B')
}

pub fn is_cellperf(keyword: &str) -> bool {
    unprefixed(keyword).starts_with('C')
}

/// `TIME`, `DAY`, `MONTH`, `YEAR` or `YEARS`.
pub fn is_timedef(keyword: &str) -> bool {
    matches!(body(keyword), "TIME" | "DAY" | "MONTH" | "YEAR" | "YEARS")
}
