// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;

use roxmltree::Error;

use super::{AId, Attribute, Document, EId, NodeData, NodeId, NodeKind, ShortRange};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
const XML_NAMESPACE_NS: &str = "http://www.w3.org/XML/1998/namespace";

impl<'input> Document<'input> {
    /// Parses a [`Document`] from a [`roxmltree::Document`].
    pub fn parse_tree(xml: &roxmltree::Document<'input>) -> Result<Document<'input>, Error> {
        parse(xml)
    }

    fn append(&mut self, parent_id: NodeId, kind: NodeKind) -> NodeId {
        let new_child_id = NodeId::from(self.nodes.len());
        self.nodes.push(NodeData {
            parent: Some(parent_id),
            next_sibling: None,
            children: None,
            kind,
        });

        let last_child_id = self.nodes[parent_id.get_usize()].children.map(|(_, id)| id);

        if let Some(id) = last_child_id {
            self.nodes[id.get_usize()].next_sibling = Some(new_child_id);
        }

        self.nodes[parent_id.get_usize()].children = Some(
            if let Some((first_child_id, _)) = self.nodes[parent_id.get_usize()].children {
                (first_child_id, new_child_id)
            } else {
                (new_child_id, new_child_id)
            },
        );

        new_child_id
    }

    fn append_attribute(&mut self, name: AId, value: roxmltree::StringStorage<'input>) {
        self.attrs.push(Attribute { name, value });
    }
}

fn parse<'input>(xml: &roxmltree::Document<'input>) -> Result<Document<'input>, Error> {
    let mut doc = Document {
        nodes: Vec::new(),
        attrs: Vec::new(),
        links: HashMap::new(),
    };

    // Add a root node.
    doc.nodes.push(NodeData {
        parent: None,
        next_sibling: None,
        children: None,
        kind: NodeKind::Root,
    });

    parse_xml_node_children(xml.root(), doc.root().id, 0, &mut doc)?;

    // Collect all elements with `id` or `xml:id` attribute.
    // The first element wins on duplicates.
    let mut links = HashMap::new();
    for node in doc.descendants() {
        if let Some(id) = node.attribute::<&str>(AId::Id) {
            if !links.contains_key(id) {
                links.insert(id.to_string(), node.id);
            }
        }
    }
    doc.links = links;

    Ok(doc)
}

fn parse_tag_name(node: roxmltree::Node) -> Option<EId> {
    if !node.is_element() {
        return None;
    }

    if node.tag_name().namespace() != Some(SVG_NS) {
        return None;
    }

    EId::from_str(node.tag_name().name())
}

fn parse_xml_node_children<'input>(
    parent: roxmltree::Node<'_, 'input>,
    parent_id: NodeId,
    depth: u32,
    doc: &mut Document<'input>,
) -> Result<(), Error> {
    for node in parent.children() {
        parse_xml_node(node, parent_id, depth, doc)?;
    }

    Ok(())
}

fn parse_xml_node<'input>(
    node: roxmltree::Node<'_, 'input>,
    parent_id: NodeId,
    depth: u32,
    doc: &mut Document<'input>,
) -> Result<(), Error> {
    if depth > 1024 {
        return Err(Error::NodesLimitReached);
    }

    let mut tag_name = match parse_tag_name(node) {
        Some(id) => id,
        None => return Ok(()),
    };

    // Treat links as groups.
    if tag_name == EId::A {
        tag_name = EId::G;
    }

    let node_id = parse_svg_element(node, parent_id, tag_name, doc)?;

    // Text content is not supported, so there is no need to go deeper.
    if tag_name != EId::Text {
        parse_xml_node_children(node, node_id, depth + 1, doc)?;
    }

    Ok(())
}

fn parse_svg_element<'input>(
    xml_node: roxmltree::Node<'_, 'input>,
    parent_id: NodeId,
    tag_name: EId,
    doc: &mut Document<'input>,
) -> Result<NodeId, Error> {
    let attrs_start_idx = doc.attrs.len();

    for attr in xml_node.attributes() {
        match attr.namespace() {
            None | Some(SVG_NS) | Some(XLINK_NS) | Some(XML_NAMESPACE_NS) => {}
            _ => continue,
        }

        let aid = match AId::from_str(attr.name()) {
            Some(v) => v,
            None => continue,
        };

        // The `style` attribute is split into declarations below.
        if aid == AId::Style {
            continue;
        }

        doc.append_attribute(aid, attr.value_storage().clone());
    }

    let style_start_idx = doc.attrs.len();

    if let Some(value) = xml_node.attribute("style") {
        for declaration in simplecss::DeclarationTokenizer::from(value) {
            let aid = match AId::from_str(declaration.name) {
                Some(v) if v.is_presentation() => v,
                _ => continue,
            };

            if let Some(attr) = doc.attrs[attrs_start_idx..style_start_idx]
                .iter()
                .find(|a| a.name == aid)
            {
                log::warn!(
                    "Style property {}='{}' overrides the element attribute {}='{}' on '{}'.",
                    aid,
                    declaration.value,
                    aid,
                    attr.value,
                    find_attribute(&doc.attrs[attrs_start_idx..style_start_idx], AId::Id)
                        .unwrap_or_default()
                );
            }

            let value = roxmltree::StringStorage::new_owned(declaration.value);

            // A later declaration of the same property replaces an earlier one.
            match doc.attrs[style_start_idx..]
                .iter()
                .position(|a| a.name == aid)
            {
                Some(idx) => doc.attrs[style_start_idx + idx].value = value,
                None => doc.append_attribute(aid, value),
            }
        }
    }

    if doc.nodes.len() > 1_000_000 {
        return Err(Error::NodesLimitReached);
    }

    let node_id = doc.append(
        parent_id,
        NodeKind::Element {
            tag_name,
            attributes: ShortRange::new(attrs_start_idx as u32, style_start_idx as u32),
            style: ShortRange::new(style_start_idx as u32, doc.attrs.len() as u32),
        },
    );

    Ok(node_id)
}

// `id` and `xml:id` are both stored as `AId::Id`.
fn find_attribute<'a>(attrs: &'a [Attribute], aid: AId) -> Option<&'a str> {
    attrs
        .iter()
        .find(|a| a.name == aid)
        .map(|a| a.value.as_str())
}
