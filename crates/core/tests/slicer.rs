use weave_core::model::{
    ArgValue, Argument, BlockKind, CodeBlock, Template, VarScope,
};
use weave_core::slicer::{slice, SliceError, EXTRACTION_OVERHEAD};

fn message(text: &str) -> CodeBlock {
    CodeBlock::player_action("SendMessage", vec![Argument::text(text)])
}

/// Starter plus `n` leaf actions, footprint `2 + 2n`.
fn flat_template(n: usize) -> Template {
    let mut blocks = vec![CodeBlock::player_event("Join")];
    for i in 0..n {
        blocks.push(message(&format!("line {i}")));
    }
    Template::new(blocks).unwrap()
}

fn total_footprint(slices: &[Template]) -> u32 {
    slices.iter().map(Template::footprint).sum()
}

#[test]
fn templates_within_budget_come_back_unchanged() {
    let template = flat_template(4); // footprint 10
    let slices = slice(&template, 10).unwrap();
    assert_eq!(slices.len(), 1);
    assert_eq!(slices[0], template);
}

#[test]
fn oversized_templates_split_into_budgeted_pieces() {
    let template = flat_template(9); // footprint 20
    let slices = slice(&template, 12).unwrap();

    assert!(slices.len() > 1);
    for piece in &slices {
        assert!(
            piece.footprint() <= 12,
            "piece `{}` has footprint {}",
            piece.name(),
            piece.footprint()
        );
    }

    // remainder first, extractions after, named <name>_<n>
    assert_eq!(slices[0].blocks[0].kind, BlockKind::Event);
    assert_eq!(slices[1].blocks[0].kind, BlockKind::FunctionDef);
    assert_eq!(slices[1].blocks[0].action, "event_Join_1");
    assert_eq!(slices[1].blocks[0].tags.get("Is Hidden"), Some(&"True".to_string()));
}

#[test]
fn footprint_is_conserved_up_to_extraction_overhead() {
    let template = flat_template(14); // footprint 30
    let slices = slice(&template, 12).unwrap();

    let extractions = (slices.len() - 1) as u32;
    assert_eq!(
        total_footprint(&slices),
        template.footprint() + extractions * EXTRACTION_OVERHEAD
    );
}

#[test]
fn every_piece_revalidates_bracket_structure() {
    let mut blocks = vec![CodeBlock::player_event("Join")];
    blocks.push(message("before"));
    blocks.extend(
        CodeBlock::if_player("IsSneaking", vec![]).with_body(vec![
            message("one"),
            message("two"),
            message("three"),
            message("four"),
        ]),
    );
    blocks.push(message("after"));
    let template = Template::new(blocks).unwrap();

    let slices = slice(&template, 10).unwrap();
    assert!(slices.len() > 1);
    // `slice` returns `Template` values, which only exist validated; cross-check
    // by rebuilding each piece from its blocks.
    for piece in &slices {
        assert!(Template::new(piece.blocks.clone()).is_ok());
    }
}

#[test]
fn shared_line_variables_are_threaded_through_the_boundary() {
    let mut blocks = vec![CodeBlock::player_event("Join")];
    blocks.push(CodeBlock::set_variable(
        "=",
        vec![Argument::line_variable("x"), Argument::number(5.0)],
    ));
    let body: Vec<CodeBlock> = (0..6)
        .map(|_| {
            CodeBlock::set_variable("+", vec![Argument::line_variable("x"), Argument::number(1.0)])
        })
        .collect();
    blocks.extend(
        CodeBlock::if_variable("=", vec![Argument::line_variable("x"), Argument::number(5.0)])
            .with_body(body),
    );
    let template = Template::new(blocks).unwrap(); // footprint 20

    let slices = slice(&template, 18).unwrap();
    assert_eq!(slices.len(), 2);

    let remainder = &slices[0];
    let extracted = &slices[1];

    // exactly one formal parameter for `x` in the extracted header
    let header = &extracted.blocks[0];
    assert_eq!(header.kind, BlockKind::FunctionDef);
    let params: Vec<&str> = header
        .args
        .iter()
        .filter_map(|arg| match &arg.value {
            ArgValue::Parameter(p) => Some(p.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(params, vec!["x"]);

    // exactly one matching call argument at the excision point
    let call = remainder
        .blocks
        .iter()
        .find(|b| b.kind == BlockKind::CallFunction)
        .expect("remainder should call the extracted function");
    assert_eq!(call.action, extracted.name());
    let call_vars: Vec<&str> = call
        .args
        .iter()
        .filter_map(|arg| match &arg.value {
            ArgValue::Variable { name, scope: VarScope::Line } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(call_vars, vec!["x"]);
}

#[test]
fn unshared_line_variables_are_not_threaded() {
    let mut blocks = vec![CodeBlock::player_event("Join")];
    // only referenced inside the scope that gets extracted
    let body: Vec<CodeBlock> = (0..8)
        .map(|_| {
            CodeBlock::set_variable(
                "+",
                vec![Argument::line_variable("inner"), Argument::number(1.0)],
            )
        })
        .collect();
    blocks.extend(CodeBlock::if_player("IsSneaking", vec![]).with_body(body));
    let template = Template::new(blocks).unwrap(); // footprint 22

    let slices = slice(&template, 20).unwrap();
    assert_eq!(slices.len(), 2);
    assert!(slices[1].blocks[0].args.is_empty());

    let call = slices[0]
        .blocks
        .iter()
        .find(|b| b.kind == BlockKind::CallFunction)
        .expect("remainder should call the extracted function");
    assert!(call.args.is_empty());
}

#[test]
fn atomic_oversized_scopes_become_their_own_oversized_slice() {
    // Empty nested scopes cannot be decomposed further, so the outermost one
    // is extracted whole even though it blows the budget.
    let innermost = CodeBlock::if_game("BlockEquals", vec![]).with_body(vec![]);
    let middle = CodeBlock::if_game("BlockEquals", vec![]).with_body(innermost);
    let mut blocks = vec![CodeBlock::player_event("Join")];
    blocks.extend(CodeBlock::if_game("BlockEquals", vec![]).with_body(middle));
    let template = Template::new(blocks).unwrap(); // footprint 14

    let slices = slice(&template, 5).unwrap();
    assert_eq!(slices.len(), 2);
    assert!(slices[0].footprint() <= 5);
    assert!(slices[1].footprint() > 5, "the atomic scope ships oversized");
    assert_eq!(slices[1].blocks[1].kind, BlockKind::IfGame);
}

#[test]
fn slicing_is_deterministic() {
    let mut blocks = vec![CodeBlock::player_event("Join")];
    blocks.push(message("a"));
    blocks.extend(CodeBlock::if_player("IsSneaking", vec![]).with_body(vec![
        message("b"),
        message("c"),
        message("d"),
    ]));
    blocks.push(message("e"));
    blocks.extend(CodeBlock::repeat("Forever", vec![]).with_body(vec![
        message("f"),
        message("g"),
    ]));
    let template = Template::new(blocks).unwrap();

    let first = slice(&template, 12).unwrap();
    let second = slice(&template, 12).unwrap();
    assert_eq!(first, second);
}

#[test]
fn hopeless_budgets_are_reported_not_looped() {
    let template = flat_template(3); // footprint 8
    assert!(matches!(slice(&template, 2), Err(SliceError::BudgetTooSmall { budget: 2 })));
}
