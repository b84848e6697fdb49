//! Display labels for differential nodes.

use super::engine::DifferentialWeightedTree;
use crate::tree::SymbolResolver;

/// Label of a differential node: `"(+12.50%) main"`
///
/// The percentage prefix is only shown for a finite difference. New nodes
/// (NaN) and nodes with a zero baseline (infinite) show the bare label.
pub fn format_label<S, R>(node: &DifferentialWeightedTree<'_, S>, resolver: &R) -> String
where
    R: SymbolResolver<S> + ?Sized,
{
    let label = resolver.resolve(node.symbol());
    let difference = node.difference();
    if difference.is_finite() {
        format!("({:+.2}%) {}", difference * 100.0, label)
    } else {
        label
    }
}

/// Short text for a difference value, for tables and summaries
pub fn format_difference(difference: f64) -> String {
    if difference.is_nan() {
        "new".to_string()
    } else if difference.is_infinite() {
        if difference > 0.0 { "+inf" } else { "-inf" }.to_string()
    } else if difference == 0.0 {
        "No Difference".to_string()
    } else {
        format!("{:+.1}%", difference * 100.0)
    }
}
