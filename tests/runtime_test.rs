use pretty_assertions::assert_eq;
use sentience::{parse, Evaluator, MemoryContext, Statement};

const TRAINED_ECHO: &str =
    r#"agent Echo { mem short train { if loss > 0.1 { reflect { mem.short["msg"] } } } }"#;

fn eval_source(source: &str, ctx: &mut MemoryContext) -> Vec<String> {
    let mut out = Vec::new();
    Evaluator::default().eval_program(&parse(source), ctx, &mut out);
    out
}

#[test]
fn it_replays_train_block_with_bound_message() {
    let mut ctx = MemoryContext::new();
    eval_source(TRAINED_ECHO, &mut ctx);

    let agent = ctx.current_agent().cloned().expect("agent registered");
    assert_eq!(agent.name, "Echo");
    assert_eq!(ctx.get_mem("short", "__init__"), "1");

    ctx.set_mem("short", "msg", "hello");
    let mut out = Vec::new();
    let evaluator = Evaluator::default();
    for body in agent.train_blocks() {
        evaluator.eval_block(body, 0, &mut ctx, &mut out);
    }
    assert!(
        out.iter().any(|line| line.trim() == r#"mem.short["msg"] = "hello""#),
        "output was {:?}",
        out
    );
}

#[test]
fn it_narrates_whole_agent() {
    let mut ctx = MemoryContext::new();
    let out = eval_source(TRAINED_ECHO, &mut ctx);
    assert_eq!(
        out,
        vec![
            "Agent: Echo",
            "  Init mem: short",
            "  Train block:",
            "    If: loss>0.1",
            "      Reflect block:",
            r#"        mem.short["msg"] = """#,
            "Agent: Echo [registered]",
        ]
    );
}

#[test]
fn it_embeds_into_latent_memory() {
    let mut ctx = MemoryContext::new();
    ctx.set_mem("short", "msg", "hello world");
    ctx.set_mem("short", "other", "world hello");
    eval_source(
        "embed msg -> mem.long embed other -> mem.short embed ghost -> mem.short",
        &mut ctx,
    );

    assert_eq!(ctx.get_mem("long", "msg"), "hello world");
    assert_eq!(ctx.get_mem("short", "msg"), "hello world");
    assert_eq!(ctx.get_mem("short", "other"), "world hello");
    assert_eq!(ctx.mem_latent().len(), 2);
    assert_eq!(ctx.similar_to("hello world"), vec!["msg"]);
}

#[test]
fn it_gates_context_includes_by_default() {
    let mut ctx = MemoryContext::new();
    ctx.set_mem("short", "msg", "joy");
    let out = eval_source(r#"if context includes "joy" { print "never" }"#, &mut ctx);
    assert!(!out.iter().any(|line| line.contains("never")));
    assert_eq!(out.last().unwrap(), r#"Condition not supported: context includes "joy""#);
}

#[test]
fn it_evaluates_single_statements() {
    let mut ctx = MemoryContext::new();
    let mut out = Vec::new();
    let stmt = Statement::Print {
        value: "direct".to_string(),
    };
    Evaluator::default().eval(&stmt, 2, &mut ctx, &mut out);
    assert_eq!(out, vec!["    direct"]);
}

#[test]
fn it_keeps_last_registered_agent() {
    let mut ctx = MemoryContext::new();
    eval_source("agent First { } agent Second { }", &mut ctx);
    assert_eq!(ctx.current_agent().map(|a| a.name.as_str()), Some("Second"));
}

#[test]
fn it_survives_deeply_nested_blocks() {
    let levels = 10_000;
    let source = format!(
        "{}print \"deep\" {}",
        "reflect { ".repeat(levels),
        "} ".repeat(levels)
    );
    let mut ctx = MemoryContext::new();
    let out = eval_source(&source, &mut ctx);

    let blocks = out.iter().filter(|line| line.trim() == "Reflect block:").count();
    assert_eq!(blocks, sentience::analyzer::parsers::MAX_BLOCK_DEPTH);
    assert_eq!(out.last().unwrap().trim(), "deep");
}
