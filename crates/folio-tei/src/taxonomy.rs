//! Motif taxonomy encoder.
//!
//! Motifs arrive as a flat collection forming a forest: nodes without a
//! parent are roots, and a node is a leaf iff no other motif names it as
//! parent. The encoder builds an explicit parent→children index, then walks
//! each root depth-first in pre-order, emitting one `<category>` per node.
//! Only leaves receive a human-readable `n` attribute and an `xml:id`, both
//! derived from the label; duplicate leaf labels are disambiguated with a
//! zero-padded numeric suffix and reported as a diagnostic.
//!
//! Precondition: the collection is a valid forest. A parent cycle would
//! recurse without bound.

use std::collections::HashMap;

use tracing::warn;

use folio_core::xml::XmlWriter;
use folio_core::Motif;

/// Encode the full motif collection as an `<encodingDesc>` block.
///
/// The output is deterministic for a given collection: roots and children
/// are visited in fetch order, and the collision counter is seeded the same
/// way every run.
pub fn encode_motifs(motifs: &[Motif], uri_prefix: &str) -> String {
    let index = ChildIndex::build(motifs);
    let mut leaf_ids: HashMap<&str, u32> = HashMap::new();

    let mut w = XmlWriter::new();
    w.open("encodingDesc", &[]).newline();
    w.open("classDecl", &[]).newline();
    w.open("taxonomy", &[("xml:id", "motifs")]).newline();
    w.element("bibl", &[], "Tags").newline();

    for root in index.roots() {
        encode_node(&mut w, root, &index, &mut leaf_ids, uri_prefix);
    }

    w.newline().close(); // taxonomy
    w.newline().close(); // classDecl
    w.newline().close(); // encodingDesc
    w.finish()
}

/// Emit one category and recurse into its children.
fn encode_node<'a>(
    w: &mut XmlWriter,
    motif: &'a Motif,
    index: &ChildIndex<'a>,
    leaf_ids: &mut HashMap<&'a str, u32>,
    uri_prefix: &str,
) {
    let children = index.children(&motif.uri);
    let same_as = format!("{}{}", uri_prefix, motif.uri);

    if children.is_empty() {
        let xml_id = assign_leaf_id(motif, leaf_ids, uri_prefix);
        w.open(
            "category",
            &[
                ("n", &motif.label),
                ("xml:id", &xml_id),
                ("sameAs", &same_as),
            ],
        );
    } else {
        w.open("category", &[("sameAs", &same_as)]);
    }
    w.newline();
    w.element("catDesc", &[], &motif.name).newline();

    for child in children {
        encode_node(w, child, index, leaf_ids, uri_prefix);
    }
    w.close();
}

/// Assign the local identifier for a leaf, disambiguating label collisions.
///
/// The counter records how many leaves have already used this label. On a
/// collision the suffix is the counter value *before* it is incremented, so
/// the second occurrence of "L" becomes `L_01`, the third `L_02`, and so on.
/// Downstream consumers depend on this numbering; do not shift it.
fn assign_leaf_id<'a>(
    motif: &'a Motif,
    leaf_ids: &mut HashMap<&'a str, u32>,
    uri_prefix: &str,
) -> String {
    let count = leaf_ids.entry(motif.label.as_str()).or_insert(0);
    let xml_id = if *count > 0 {
        let reassigned = format!("{}_{:02}", motif.label, count);
        warn!(
            label = %motif.label,
            xml_id = %reassigned,
            uri = %format!("{}{}", uri_prefix, motif.uri),
            "motif label already exists; reassigning xml:id"
        );
        reassigned
    } else {
        motif.label.clone()
    };
    *count += 1;
    xml_id
}

/// Parent→children index over the flat collection.
///
/// Children keep collection order, so the traversal is stable. Leaf
/// detection is "children list empty", computed once here rather than
/// re-derived during the walk.
struct ChildIndex<'a> {
    children: HashMap<&'a str, Vec<&'a Motif>>,
    roots: Vec<&'a Motif>,
}

impl<'a> ChildIndex<'a> {
    fn build(motifs: &'a [Motif]) -> Self {
        let mut children: HashMap<&str, Vec<&Motif>> = HashMap::new();
        for motif in motifs {
            children.entry(motif.uri.as_str()).or_default();
        }
        for motif in motifs {
            if let Some(parent) = &motif.parent {
                children.entry(parent.uri.as_str()).or_default().push(motif);
            }
        }
        let roots = motifs.iter().filter(|m| m.parent.is_none()).collect();

        Self { children, roots }
    }

    fn children(&self, uri: &str) -> &[&'a Motif] {
        self.children.get(uri).map(Vec::as_slice).unwrap_or(&[])
    }

    fn roots(&self) -> &[&'a Motif] {
        &self.roots
    }
}
