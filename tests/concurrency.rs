mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use common::{compute, init_tracing};
use distcalc::calculation::calculate;
use distcalc::orchestrator::{ExpressionStatus, Scheduler};
use tokio::sync::Mutex;

const EXPRESSIONS: &[&str] = &[
    "2+3*4",
    "(2+3)*4",
    "((1+2)*(3+4))/(5-2)",
    "100-50/5*2+1",
    "1.5*4-0.5/2",
    "(((8)))",
    "9-8-7-6-5",
    "(1+1)*(2+2)*(3+3)*(4+4)",
    "42/7+3*(2-1)",
    "0.1+0.2+0.3+0.4",
];

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_workers_converge_without_duplicate_dispatch() {
    init_tracing();
    let scheduler = Scheduler::default();

    let mut ids = Vec::new();
    for source in EXPRESSIONS {
        ids.push(scheduler.compile(source).await.unwrap());
    }

    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut handles = Vec::new();
    for _ in 0..8 {
        let scheduler = scheduler.clone();
        let seen = Arc::clone(&seen);
        handles.push(tokio::spawn(async move {
            let mut idle_rounds = 0;
            while idle_rounds < 50 {
                match scheduler.dispatch().await {
                    Some(task) => {
                        idle_rounds = 0;
                        seen.lock().await.push(task.id);
                        tokio::task::yield_now().await;
                        scheduler.complete(task.id, compute(&task)).await.unwrap();
                    }
                    None => {
                        idle_rounds += 1;
                        tokio::time::sleep(Duration::from_millis(2)).await;
                    }
                }
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let seen = seen.lock().await;
    let unique: HashSet<u64> = seen.iter().copied().collect();
    assert_eq!(unique.len(), seen.len(), "a task was dispatched twice");

    let mut total_tasks = 0;
    for (id, source) in ids.iter().zip(EXPRESSIONS) {
        let expression = scheduler.expression(*id).await.unwrap();
        total_tasks += expression.tasks.len();
        assert_eq!(expression.status, ExpressionStatus::Completed, "{source}");
        assert_eq!(expression.result, Some(calculate(source).unwrap()), "{source}");
    }
    assert_eq!(seen.len(), total_tasks);

    let stats = scheduler.stats().await;
    assert_eq!((stats.ready, stats.pending), (0, 0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_dispatchers_never_share_a_task() {
    let scheduler = Scheduler::default();
    for i in 0..200 {
        scheduler.compile(&format!("{}+{}", i, i + 1)).await.unwrap();
    }

    let mut handles = Vec::new();
    for _ in 0..16 {
        let scheduler = scheduler.clone();
        handles.push(tokio::spawn(async move {
            let mut taken = Vec::new();
            while let Some(task) = scheduler.dispatch().await {
                taken.push(task.id);
            }
            taken
        }));
    }

    let mut all = Vec::new();
    for handle in handles {
        all.extend(handle.await.unwrap());
    }
    let unique: HashSet<u64> = all.iter().copied().collect();
    assert_eq!(all.len(), 200);
    assert_eq!(unique.len(), 200);
}
