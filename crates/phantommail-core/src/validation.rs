use chrono::{Days, NaiveDate};

use crate::customs::{CustomsDeclaration, NET_MASS_RATIO, round2};
use crate::error::{Error, Result};
use crate::types::{Goods, TransportOrder};

/// Validate the documented ranges of a goods item.
pub fn validate_goods(goods: &Goods) -> Result<()> {
    if !(1..=100).contains(&goods.quantity) {
        return Err(Error::Invariant(format!(
            "goods quantity {} outside 1..=100",
            goods.quantity
        )));
    }
    if !(350..=1000).contains(&goods.weight) {
        return Err(Error::Invariant(format!(
            "goods weight {} outside 350..=1000",
            goods.weight
        )));
    }
    if !(10..=1000).contains(&goods.volume) {
        return Err(Error::Invariant(format!(
            "goods volume {} outside 10..=1000",
            goods.volume
        )));
    }
    Ok(())
}

/// Validate a transport order generated on `today`.
///
/// This checks:
/// - goods ranges
/// - loading date between tomorrow and ten days out
/// - unloading one to five days after loading
pub fn validate_transport_order(order: &TransportOrder, today: NaiveDate) -> Result<()> {
    validate_goods(&order.goods)?;

    let earliest = today + Days::new(1);
    let latest = today + Days::new(10);
    if order.loading_date < earliest || order.loading_date > latest {
        return Err(Error::Invariant(format!(
            "loading date {} outside {earliest}..={latest}",
            order.loading_date
        )));
    }

    let gap = (order.unloading_date - order.loading_date).num_days();
    if !(1..=5).contains(&gap) {
        return Err(Error::Invariant(format!(
            "unloading date {} is {gap} days after loading date {}",
            order.unloading_date, order.loading_date
        )));
    }

    Ok(())
}

/// Validate mass and tax arithmetic of a customs declaration.
pub fn validate_declaration(declaration: &CustomsDeclaration) -> Result<()> {
    if declaration.items.is_empty() {
        return Err(Error::Invariant(format!(
            "declaration {} has no items",
            declaration.mrn
        )));
    }
    for item in &declaration.items {
        let expected = round2(item.gross_mass_kg * NET_MASS_RATIO);
        if (item.net_mass_kg - expected).abs() > 1e-9 {
            return Err(Error::Invariant(format!(
                "item {} net mass {} does not match gross mass {}",
                item.item_number, item.net_mass_kg, item.gross_mass_kg
            )));
        }
    }

    if declaration.tax_lines.is_empty() {
        return Err(Error::Invariant(format!(
            "declaration {} has no tax lines",
            declaration.mrn
        )));
    }
    for line in &declaration.tax_lines {
        let expected = round2(line.tax_base * f64::from(line.tax_rate) / 100.0);
        if (line.total_tax_assessed - expected).abs() > 0.005 {
            return Err(Error::Invariant(format!(
                "tax line {} total {} does not match base {} at {}%",
                line.tax_type.code(),
                line.total_tax_assessed,
                line.tax_base,
                line.tax_rate
            )));
        }
    }

    Ok(())
}

/// Template placeholders (`{identifier}`) still present in `text`.
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let ident_len = after
            .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
            .unwrap_or(after.len());
        let ident = &after[..ident_len];
        if !ident.is_empty()
            && !ident.starts_with(|ch: char| ch.is_ascii_digit())
            && after[ident_len..].starts_with('}')
        {
            found.push(ident.to_string());
        }
        rest = after;
    }
    found
}

/// Fail when `text` still carries an unresolved placeholder.
pub fn ensure_placeholders_resolved(text: &str) -> Result<()> {
    let unresolved = unresolved_placeholders(text);
    if unresolved.is_empty() {
        Ok(())
    } else {
        Err(Error::Invariant(format!(
            "unresolved placeholders: {}",
            unresolved.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_unresolved_placeholders() {
        let text = "Deliver to {delivery_address} on {date}; json {\"a\": 1} {}";
        assert_eq!(
            unresolved_placeholders(text),
            vec!["delivery_address".to_string(), "date".to_string()]
        );
        assert!(ensure_placeholders_resolved("all {good").is_ok());
    }

    #[test]
    fn rejects_out_of_range_goods() {
        let goods = Goods {
            name: "Pallets".to_string(),
            quantity: 0,
            weight: 400,
            volume: 20,
            description: "Stacked pallets".to_string(),
        };
        assert!(matches!(validate_goods(&goods), Err(Error::Invariant(_))));
    }
}
