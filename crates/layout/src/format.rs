/// Fixed currency glyph printed before every amount.
pub const CURRENCY_GLYPH: char = '₹';

/// Formats an integer amount as `₹<digits>`, without grouping or decimals.
pub fn format_currency(amount: u64) -> String {
    let mut buffer = itoa::Buffer::new();
    let digits = buffer.format(amount);
    let mut out = String::with_capacity(digits.len() + CURRENCY_GLYPH.len_utf8());
    out.push(CURRENCY_GLYPH);
    out.push_str(digits);
    out
}

pub fn format_quantity(quantity: u32) -> String {
    itoa::Buffer::new().format(quantity).to_string()
}

/// `"<label>: <value>"`
pub fn labelled(label: &str, value: &str) -> String {
    format!("{}: {}", label, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_has_prefix_and_no_grouping() {
        assert_eq!(format_currency(10000), "₹10000");
        assert_eq!(format_currency(0), "₹0");
        assert_eq!(format_currency(1234567), "₹1234567");
    }

    #[test]
    fn quantity_is_plain_integer() {
        assert_eq!(format_quantity(0), "0");
        assert_eq!(format_quantity(12), "12");
    }

    #[test]
    fn labelled_value() {
        assert_eq!(labelled("Bill To", "Asha"), "Bill To: Asha");
    }
}
