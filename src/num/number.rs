use serde_json::Number;

/// Plain decimal rendering of a JSON number, never in exponent form.
pub fn format_number(number: &Number) -> String {
    if let Some(value) = number.as_i64() {
        let mut buffer = itoa::Buffer::new();
        return buffer.format(value).to_string();
    }
    if let Some(value) = number.as_u64() {
        let mut buffer = itoa::Buffer::new();
        return buffer.format(value).to_string();
    }
    match number.as_f64() {
        Some(value) => format_float(value),
        None => number.to_string(),
    }
}

pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let mut buffer = ryu::Buffer::new();
    let raw = buffer.format_finite(value);
    match raw.find(['e', 'E']) {
        Some(idx) => expand_exponent(&raw[..idx], &raw[idx + 1..]),
        None => trim_fraction(raw.to_string()),
    }
}

fn expand_exponent(mantissa: &str, exponent: &str) -> String {
    let (negative, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits: String = int_part.chars().chain(frac_part.chars()).collect();
    let exp: i64 = exponent.parse().unwrap_or(0);
    let point = int_part.len() as i64 + exp;

    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }
    if point <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat_n('0', (-point) as usize));
        out.push_str(&digits);
    } else if point as usize >= digits.len() {
        out.push_str(&digits);
        out.extend(std::iter::repeat_n('0', point as usize - digits.len()));
    } else {
        let (head, tail) = digits.split_at(point as usize);
        out.push_str(head);
        out.push('.');
        out.push_str(tail);
    }
    trim_fraction(out)
}

fn trim_fraction(mut value: String) -> String {
    if value.contains('.') {
        let trimmed = value.trim_end_matches('0').trim_end_matches('.').len();
        value.truncate(trimmed);
    }
    value
}
