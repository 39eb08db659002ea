//! Formatting rules for rendered values.
//!
//! The dashboard has always been rendered by a browser, and existing page
//! templates and screenshots depend on the exact strings, so rounding follows
//! JavaScript's `Math.round` / `toFixed` rather than Rust's float formatting.

use crate::core::api::Uptime;

/// `Math.round`: halves round towards positive infinity
pub fn js_round(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// `Number.prototype.toFixed`.
///
/// The rounding is decided on the exact decimal value of the double, so
/// `0.015` (stored as 0.01499...) gives `"0.01"`. Ties round away from zero.
pub fn to_fixed(x: f64, digits: usize) -> String {
    if !x.is_finite() {
        return x.to_string();
    }

    // fixed-precision float formatting is exact; the extra digits only decide the rounding
    let exact = format!("{:.*}", digits + 30, x.abs());
    let (int_part, frac) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac.bytes().take(digits))
        .collect();
    if frac.as_bytes().get(digits).is_some_and(|d| *d >= b'5') {
        increment_digits(&mut kept);
    }

    let int_len = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    // avoid "-0.00"
    if x < 0.0 && kept.iter().any(|d| *d != b'0') {
        out.push('-');
    }
    out.extend(kept[..int_len].iter().map(|d| *d as char));
    if digits > 0 {
        out.push('.');
        out.extend(kept[int_len..].iter().map(|d| *d as char));
    }
    out
}

/// Add one to a string of ASCII digits, growing it on overflow ("99" -> "100")
fn increment_digits(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// Parsed value of `to_fixed`, what JavaScript gets back when the string is used in arithmetic
pub fn fixed_value(x: f64, digits: usize) -> f64 {
    to_fixed(x, digits).parse().unwrap_or(x)
}

/// `42.6` -> `"43%"`
pub fn format_percent(pct: f64) -> String {
    format!("{}%", to_fixed(pct, 0))
}

/// Width as written into a bar's style, `42.6` -> `"42.6%"`
pub fn format_width(width: f64) -> String {
    let width = if width == 0.0 { 0.0 } else { width };
    format!("{}%", width)
}

/// `12.3456` -> `"12.35 Mbps"`
pub fn format_mbps(mbps: f64) -> String {
    format!("{} Mbps", to_fixed(mbps, 2))
}

/// Width of a throughput bar in percent.
///
/// Computed from the two-decimal value that is displayed. Values above
/// `full_scale_mbps` give widths above 100; surfaces decide how to draw them.
pub fn throughput_bar_width(mbps: f64, full_scale_mbps: f64) -> f64 {
    fixed_value(mbps, 2) * (100.0 / full_scale_mbps)
}

/// `23.4` -> `"23 ms"`
pub fn format_ping(ms: f64) -> String {
    format!("{} ms", to_fixed(ms, 0))
}

/// Rounds to an integer and groups thousands the `en-US` way: `7876.88` -> `"7,877"`
pub fn group_thousands(value: f64) -> String {
    let fixed = to_fixed(value, 0);
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}", sign, grouped)
}

/// Fractional load average as percent: `0.52` -> `"52%"`
pub fn format_load(load: f64) -> String {
    format!("{}%", to_fixed(load * 100.0, 0))
}

/// Width a load bar gets, the same rounded percent as its label
pub fn load_bar_width(load: f64) -> f64 {
    js_round(load * 100.0)
}

/// `"<free> free out of <total>"`
pub fn free_out_of(free: &str, total: &str) -> String {
    format!("{} free out of {}", free, total)
}

/// `"6 days, 2 hours, 26 minutes"`
pub fn format_uptime(uptime: &Uptime) -> String {
    format!("{}, {}, {}", uptime.days, uptime.hours, uptime.min)
}
