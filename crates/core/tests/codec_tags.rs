use weave_core::catalog::{ActionSpec, JsonCatalog, TagSpec};
use weave_core::codec::wire::{WireItem, WireTag};
use weave_core::codec::Codec;
use weave_core::model::{Argument, BlockKind, CodeBlock, Template};

/// Catalog fixture with the `set_var/+` action carrying one tag, plus the
/// shared entry for function definitions.
fn sample_catalog() -> JsonCatalog {
    let mut catalog = JsonCatalog::default();
    catalog.insert(
        BlockKind::SetVariable,
        "+",
        ActionSpec {
            tags: vec![TagSpec {
                name: "Result Variable Mode".to_string(),
                options: vec!["Default Value".to_string(), "Create List".to_string()],
                default: "Default Value".to_string(),
                slot: 26,
            }],
            arg_types: vec!["VARIABLE".to_string(), "NUMBER".to_string()],
            deprecated: false,
        },
    );
    catalog.insert(
        BlockKind::FunctionDef,
        "dynamic",
        ActionSpec {
            tags: vec![TagSpec {
                name: "Is Hidden".to_string(),
                options: vec!["True".to_string(), "False".to_string()],
                default: "False".to_string(),
                slot: 26,
            }],
            arg_types: vec![],
            deprecated: false,
        },
    );
    catalog
}

fn plus_template(block: CodeBlock) -> Template {
    Template::new(vec![CodeBlock::player_event("Join"), block]).unwrap()
}

fn tag_items(document: &weave_core::codec::wire::WireTemplate, index: usize) -> Vec<&WireTag> {
    document.blocks[index]
        .args
        .as_ref()
        .expect("encoded blocks always carry an item container")
        .items
        .iter()
        .filter_map(|slot| match &slot.item {
            WireItem::Tag(tag) => Some(tag),
            _ => None,
        })
        .collect()
}

#[test]
fn schema_defaults_are_appended_after_arguments() {
    let catalog = sample_catalog();
    let codec = Codec::new(&catalog);
    let template = plus_template(CodeBlock::set_variable(
        "+",
        vec![Argument::line_variable("x"), Argument::line_variable("y")],
    ));

    let document = codec.encode_document(&template).unwrap();
    let items = &document.blocks[1].args.as_ref().unwrap().items;

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].slot, Some(0));
    assert_eq!(items[1].slot, Some(1));
    match &items[2].item {
        WireItem::Tag(tag) => {
            assert_eq!(tag.tag, "Result Variable Mode");
            assert_eq!(tag.option, "Default Value");
            assert_eq!(tag.action, "+");
            assert_eq!(tag.block, "set_var");
            assert_eq!(items[2].slot, Some(26));
        }
        other => panic!("expected a tag item, got {other:?}"),
    }
}

#[test]
fn caller_chosen_options_override_defaults() {
    let catalog = sample_catalog();
    let codec = Codec::new(&catalog);
    let template = plus_template(
        CodeBlock::set_variable("+", vec![Argument::line_variable("x")])
            .with_tag("Result Variable Mode", "Create List"),
    );

    let document = codec.encode_document(&template).unwrap();
    let tags = tag_items(&document, 1);
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].option, "Create List");
}

#[test]
fn invalid_options_fall_back_to_the_default() {
    let catalog = sample_catalog();
    let codec = Codec::new(&catalog);
    let template = plus_template(
        CodeBlock::set_variable("+", vec![Argument::line_variable("x")])
            .with_tag("Result Variable Mode", "Bogus Option"),
    );

    let document = codec.encode_document(&template).unwrap();
    let tags = tag_items(&document, 1);
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].option, "Default Value");
}

#[test]
fn unknown_tag_names_are_ignored() {
    let catalog = sample_catalog();
    let codec = Codec::new(&catalog);
    let template = plus_template(
        CodeBlock::set_variable("+", vec![Argument::line_variable("x")])
            .with_tag("No Such Tag", "Whatever"),
    );

    let document = codec.encode_document(&template).unwrap();
    let tags = tag_items(&document, 1);
    // only the schema tag is emitted, with its default
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].tag, "Result Variable Mode");
    assert_eq!(tags[0].option, "Default Value");
}

#[test]
fn unknown_actions_encode_without_tags() {
    let catalog = sample_catalog();
    let codec = Codec::new(&catalog);
    let template = plus_template(CodeBlock::set_variable("*", vec![Argument::line_variable("x")]));

    let document = codec.encode_document(&template).unwrap();
    assert!(tag_items(&document, 1).is_empty());
}

#[test]
fn overfull_containers_drop_arguments_from_the_end() {
    let catalog = sample_catalog();
    let codec = Codec::new(&catalog);
    let args: Vec<Argument> = (0..30).map(|i| Argument::number(f64::from(i))).collect();
    let template = plus_template(CodeBlock::set_variable("+", args));

    let document = codec.encode_document(&template).unwrap();
    let items = &document.blocks[1].args.as_ref().unwrap().items;

    // 26 argument items survive alongside the single tag item
    assert_eq!(items.len(), 27);
    assert!(matches!(&items[25].item, WireItem::Number { name } if name == "25"));
    assert!(matches!(&items[26].item, WireItem::Tag(_)));
}

#[test]
fn decoded_tag_choices_round_trip_without_a_catalog_hit() {
    let catalog = sample_catalog();
    let codec = Codec::new(&catalog);
    let template = plus_template(
        CodeBlock::set_variable("+", vec![Argument::line_variable("x")])
            .with_tag("Result Variable Mode", "Create List"),
    );

    let code = codec.encode(&template).unwrap();
    let decoded = codec.decode(&code).unwrap();
    assert_eq!(
        decoded.blocks[1].tags.get("Result Variable Mode"),
        Some(&"Create List".to_string())
    );

    // Re-encoding the decoded template keeps the same choice even without
    // catalog help on the decode side.
    let recoded = codec.encode(&decoded).unwrap();
    let redecoded = codec.decode(&recoded).unwrap();
    assert_eq!(decoded.blocks, redecoded.blocks);
}

#[test]
fn hidden_function_headers_keep_their_tag() {
    let catalog = sample_catalog();
    let codec = Codec::new(&catalog);
    let template = Template::new(vec![
        CodeBlock::function_def("helper", vec![]).with_tag("Is Hidden", "True"),
        CodeBlock::player_action("SendMessage", vec![Argument::text("hi")]),
    ])
    .unwrap();

    let document = codec.encode_document(&template).unwrap();
    let tags = tag_items(&document, 0);
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].tag, "Is Hidden");
    assert_eq!(tags[0].option, "True");
    // the catalog entry is shared; the wire keeps the user-chosen name in
    // `data` and the catalog key in the tag's `action`
    assert_eq!(tags[0].action, "dynamic");
    assert_eq!(document.blocks[0].data.as_deref(), Some("helper"));
}
