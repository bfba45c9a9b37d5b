use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sentience::{parse, Evaluator, MemoryContext};

const ECHO_AGENT: &str = r#"
agent Echo {
  mem short
  goal: "Store and reflect"
  on input(msg) {
    embed msg -> mem.short
    reflect { mem.short["msg"] }
  }
  train {
    if loss > 0.1 {
      reflect { mem.short["msg"] }
    }
  }
}
"#;

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse echo agent", |b| b.iter(|| parse(black_box(ECHO_AGENT))));
}

fn bench_eval(c: &mut Criterion) {
    let program = parse(ECHO_AGENT);
    let evaluator = Evaluator::default();
    c.bench_function("eval echo agent", |b| {
        b.iter(|| {
            let mut ctx = MemoryContext::new();
            let mut out: Vec<String> = Vec::new();
            evaluator.eval_program(black_box(&program), &mut ctx, &mut out);
        })
    });
}

fn bench_similarity(c: &mut Criterion) {
    let mut ctx = MemoryContext::new();
    for i in 0..100 {
        ctx.embed_latent(&format!("k{i}"), &format!("word{i} other{i} more{i}"));
    }
    c.bench_function("similar_to over 100 keys", |b| {
        b.iter(|| ctx.similar_to(black_box("word1 other1 more1")))
    });
}

criterion_group!(benches, bench_parse, bench_eval, bench_similarity);
criterion_main!(benches);
