//! Text forms of scalar values.
//!
//! Storable scalars are always text, so numbers are written in base 10. Floats use the shortest
//! digit string that parses back to the same value, laid out in general notation: plain decimal
//! when the decimal exponent is in `-4..6`, otherwise `d.ddde±XX` with at least two exponent
//! digits.

use std::fmt::Write;

pub fn bool_text(v: bool) -> &'static str {
    if v {
        "1"
    } else {
        "0"
    }
}

pub fn f64_text(v: f64) -> String {
    if let Some(s) = non_finite(v.is_nan(), v.is_infinite(), v.is_sign_negative()) {
        return s.to_string();
    }
    general(&format!("{:e}", v.abs()), v.is_sign_negative())
}

pub fn f32_text(v: f32) -> String {
    if let Some(s) = non_finite(v.is_nan(), v.is_infinite(), v.is_sign_negative()) {
        return s.to_string();
    }
    general(&format!("{:e}", v.abs()), v.is_sign_negative())
}

fn non_finite(nan: bool, inf: bool, neg: bool) -> Option<&'static str> {
    match (nan, inf, neg) {
        (true, _, _) => Some("NaN"),
        (_, true, false) => Some("+Inf"),
        (_, true, true) => Some("-Inf"),
        _ => None,
    }
}

/// Lay out the shortest digits from a `{:e}` rendering (`1.2345e-7`, `5e0`) in general notation.
fn general(sci: &str, neg: bool) -> String {
    let (mantissa, exp) = sci.split_at(sci.find('e').unwrap_or(sci.len()));
    let exp: i32 = exp.get(1..).and_then(|e| e.parse().ok()).unwrap_or(0);
    let digits: Vec<u8> = mantissa.bytes().filter(|b| b.is_ascii_digit()).collect();

    let mut out = String::with_capacity(digits.len() + 8);
    if neg {
        out.push('-');
    }

    if exp < -4 || exp >= 6 {
        out.push(digits[0] as char);
        if digits.len() > 1 {
            out.push('.');
            out.extend(digits[1..].iter().map(|&d| d as char));
        }
        out.push('e');
        out.push(if exp < 0 { '-' } else { '+' });
        let _ = write!(out, "{:02}", exp.unsigned_abs());
        return out;
    }

    // Position of the decimal point, counted from the first digit.
    let point = exp + 1;
    if point <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-point) as usize));
        out.extend(digits.iter().map(|&d| d as char));
    } else {
        let point = point as usize;
        for i in 0..point {
            out.push(digits.get(i).map_or('0', |&d| d as char));
        }
        if digits.len() > point {
            out.push('.');
            out.extend(digits[point..].iter().map(|&d| d as char));
        }
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::Rng;

    #[test]
    fn bools() {
        assert_eq!(bool_text(true), "1");
        assert_eq!(bool_text(false), "0");
    }

    #[test]
    fn plain_decimal() {
        assert_eq!(f64_text(5.55), "5.55");
        assert_eq!(f64_text(0.0), "0");
        assert_eq!(f64_text(1.0), "1");
        assert_eq!(f64_text(100.0), "100");
        assert_eq!(f64_text(123456.0), "123456");
        assert_eq!(f64_text(0.0001), "0.0001");
        assert_eq!(f64_text(0.125), "0.125");
        assert_eq!(f64_text(-2.5), "-2.5");
        assert_eq!(f64_text(-0.0), "-0");
    }

    #[test]
    fn exponent_form() {
        assert_eq!(f64_text(1234567.0), "1.234567e+06");
        assert_eq!(f64_text(1e21), "1e+21");
        assert_eq!(f64_text(0.00001), "1e-05");
        assert_eq!(f64_text(-1.5e-10), "-1.5e-10");
        assert_eq!(f64_text(1e100), "1e+100");
        assert_eq!(f64_text(5e-324), "5e-324");
    }

    #[test]
    fn width_aware() {
        assert_eq!(f32_text(0.1), "0.1");
        assert_eq!(f64_text(0.1f32 as f64), "0.10000000149011612");
        assert_eq!(f32_text(16777216.0), "1.6777216e+07");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(f64_text(f64::NAN), "NaN");
        assert_eq!(f64_text(f64::INFINITY), "+Inf");
        assert_eq!(f64_text(f64::NEG_INFINITY), "-Inf");
        assert_eq!(f32_text(f32::NEG_INFINITY), "-Inf");
    }

    #[test]
    fn random_round_trip() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let v = f64::from_bits(rng.gen::<u64>());
            if !v.is_finite() {
                continue;
            }
            let s = f64_text(v);
            assert!(s.len() <= 24, "{} is longer than expected", s);
            assert_eq!(s.parse::<f64>().unwrap(), v, "{} didn't round-trip", s);
        }
        for _ in 0..1000 {
            let v = f32::from_bits(rng.gen::<u32>());
            if !v.is_finite() {
                continue;
            }
            let s = f32_text(v);
            assert_eq!(s.parse::<f32>().unwrap(), v, "{} didn't round-trip", s);
        }
    }
}
