//! Table rules. Row groups are flattened away, so a table holds rows and a
//! row holds cells.

use mdrewrite_core::{MdKind, MdNode};

use super::{emit, Rule, Shape};

/// Create the table rules
pub fn table_rules() -> Vec<Rule> {
    vec![
        Rule::handle(
            Shape::is(&["table"]).can_have_class(&["standard-table", "fullwidth-table", "properties"]),
            |node, t, _| emit(MdNode::table(t.transform(node)?)?),
        ),
        // Row groups carry no meaning of their own
        Rule::handle(Shape::is(&["thead", "tbody", "tfoot"]), |node, t, _| {
            Ok(Some(t.transform(node)?))
        }),
        Rule::rename(Shape::is(&["tr"]), MdKind::TableRow),
        Rule::handle(Shape::is(&["th", "td"]).can_have(&["scope"]), |node, t, _| {
            let content = unwrap_paragraphs(t.transform(node)?);
            emit(MdNode::table_cell(node.is_tag("th"), content)?)
        }),
    ]
}

/// Cells hold phrasing content only, so paragraph boundaries are dropped
fn unwrap_paragraphs(nodes: Vec<MdNode>) -> Vec<MdNode> {
    nodes
        .into_iter()
        .flat_map(|node| match node {
            MdNode::Paragraph(children) => children,
            other => vec![other],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use crate::options::TransformOptions;
    use crate::rules::{Query, RuleTable};
    use crate::transform::Transformer;
    use mdrewrite_core::{TableCell, TableRow};

    fn rules() -> RuleTable {
        let mut table: RuleTable = table_rules().into_iter().collect();
        table
            .push(Rule::handle(Query::predicate(|n| n.is_text()), |node, t, _| {
                Ok(Some(t.transform(node)?))
            }))
            .push(Rule::rename(Query::tag("p"), MdKind::Paragraph));
        table
    }

    fn cell(header: bool, text: &str) -> TableCell {
        TableCell {
            header,
            children: vec![MdNode::Text(text.to_string())],
        }
    }

    #[test]
    fn test_table_with_sections() {
        let source = Node::element_with_attrs("table", vec![("class", "standard-table")])
            .with_child(
                Node::element("thead").with_child(
                    Node::element("tr")
                        .with_child(Node::element_with_attrs("th", vec![("scope", "col")]).with_text("Name")),
                ),
            )
            .with_child(
                Node::element("tbody").with_child(
                    Node::element("tr")
                        .with_child(Node::element("td").with_child(Node::element("p").with_text("x"))),
                ),
            );

        let rules = rules();
        let out = Transformer::new(&rules)
            .transform(&source, &TransformOptions::default())
            .unwrap();

        assert!(out.diagnostics.is_empty());
        assert_eq!(
            out.nodes,
            vec![MdNode::Table {
                rows: vec![
                    TableRow {
                        cells: vec![cell(true, "Name")]
                    },
                    TableRow {
                        cells: vec![cell(false, "x")]
                    },
                ]
            }]
        );
    }

    #[test]
    fn test_table_with_caption_is_invalid() {
        let source = Node::element("table")
            .with_child(Node::element("caption").with_text("c"))
            .with_child(Node::element("tr").with_child(Node::element("td").with_text("x")));

        let rules = rules();
        let out = Transformer::new(&rules)
            .transform(&source, &TransformOptions::default())
            .unwrap();

        assert_eq!(out.diagnostics.unhandled, vec![&source.children[0]]);
        assert_eq!(out.diagnostics.invalid.len(), 1);
        assert_eq!(out.diagnostics.invalid[0].target, MdKind::Table);
        assert_eq!(
            out.diagnostics.invalid[0].offending,
            vec![MdNode::Html("<caption>c</caption>".to_string())]
        );
    }

    #[test]
    fn test_cell_with_unknown_attribute_is_unhandled() {
        let td = Node::element_with_attrs("td", vec![("colspan", "2")]).with_text("x");
        let rules = rules();
        let out = Transformer::new(&rules)
            .transform(&td, &TransformOptions::default())
            .unwrap();
        assert_eq!(out.diagnostics.unhandled, vec![&td]);
    }
}
