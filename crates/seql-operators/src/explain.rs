//! Plan rendering: one operator per line, children indented under parents.

use crate::traits::Node;

pub fn explain(root: &dyn Node) -> String {
    let mut out = String::new();
    render(root, 0, &mut out);
    out
}

fn render(node: &dyn Node, indent: usize, out: &mut String) {
    let pad = " ".repeat(indent);
    out.push_str(&pad);
    out.push_str(&node.describe());
    out.push('\n');
    for child in node.children() {
        render(child, indent + 2, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConstantSelect, Cross, Scan};
    use seql_core::prelude::Relation;

    #[test]
    fn children_are_indented_left_to_right() {
        let r = Relation::from_literal(["a"], [["1"]]).unwrap();
        let c = Relation::from_literal(["b"], [["2"], ["3"]]).unwrap();
        let plan = ConstantSelect::new(
            Box::new(Cross::new(Box::new(Scan::new(r)), Box::new(Scan::new(c)))),
            0,
            "1",
        );
        assert_eq!(
            explain(&plan),
            concat!(
                "constant_select(#0 == \"1\")\n",
                "  cross\n",
                "    scan(columns=[a], rows=1)\n",
                "    scan(columns=[b], rows=2)\n",
            )
        );
    }
}
