// tests/readiness.rs

mod common;
use crate::common::init_tracing;
use crate::common::tasks::{ExecutionLog, RecordingTask};

use std::error::Error;

use taskdag::dag::{NodeId, TaskGraph};
use taskdag::params::ParameterStore;

type TestResult = Result<(), Box<dyn Error>>;

fn add(graph: &mut TaskGraph, log: &ExecutionLog, name: &str) -> NodeId {
    graph.add_node(name, RecordingTask::new(log).into_arc(), ParameterStore::new())
}

/// A -> B, A -> C, B -> D, C -> D
fn diamond(log: &ExecutionLog) -> (TaskGraph, [NodeId; 4]) {
    let mut graph = TaskGraph::new();
    let a = add(&mut graph, log, "A");
    let b = add(&mut graph, log, "B");
    let c = add(&mut graph, log, "C");
    let d = add(&mut graph, log, "D");
    graph.add_downstream(a, b).unwrap();
    graph.add_downstream(a, c).unwrap();
    graph.add_downstream(b, d).unwrap();
    graph.add_downstream(c, d).unwrap();
    (graph, [a, b, c, d])
}

#[test]
fn source_node_is_always_ready() -> TestResult {
    init_tracing();
    let log = ExecutionLog::new();
    let mut graph = TaskGraph::new();
    let a = add(&mut graph, &log, "A");

    let report = graph.run(a)?;

    assert_eq!(report.executed, vec![a]);
    assert!(graph.is_finished(a)?);
    assert_eq!(log.names(), vec!["A"]);
    Ok(())
}

#[test]
fn run_on_unready_node_has_no_effect() -> TestResult {
    init_tracing();
    let log = ExecutionLog::new();
    let mut graph = TaskGraph::new();
    let a = add(&mut graph, &log, "A");
    let b = add(&mut graph, &log, "B");
    graph.add_downstream(a, b)?;

    let report = graph.run(b)?;

    assert!(report.executed.is_empty());
    assert_eq!(report.deferred, 1);
    assert!(!graph.is_finished(a)?);
    assert!(!graph.is_finished(b)?);
    assert!(log.is_empty());
    Ok(())
}

#[test]
fn diamond_runs_join_once_after_both_branches() -> TestResult {
    init_tracing();
    let log = ExecutionLog::new();
    let (mut graph, [a, b, c, d]) = diamond(&log);

    let report = graph.run(a)?;

    assert_eq!(log.count("D"), 1);
    assert_eq!(log.names(), vec!["A", "B", "C", "D"]);
    assert_eq!(report.executed, vec![a, b, c, d]);
    // B's trigger of D arrives while C is still unfinished.
    assert_eq!(report.deferred, 1);
    for id in [a, b, c, d] {
        assert!(graph.is_finished(id)?);
    }
    Ok(())
}

#[test]
fn diamond_join_waits_for_the_slower_branch() -> TestResult {
    init_tracing();
    let log = ExecutionLog::new();
    let mut graph = TaskGraph::new();
    // A -> B -> B2 -> D and A -> C -> D: the long branch finishes last.
    let a = add(&mut graph, &log, "A");
    let b = add(&mut graph, &log, "B");
    let b2 = add(&mut graph, &log, "B2");
    let c = add(&mut graph, &log, "C");
    let d = add(&mut graph, &log, "D");
    graph.add_serial_pipeline(a, &[b, b2, d])?;
    graph.add_serial_pipeline(a, &[c, d])?;

    graph.run(a)?;

    assert_eq!(log.names(), vec!["A", "B", "B2", "C", "D"]);
    assert_eq!(log.count("D"), 1);
    Ok(())
}

#[test]
fn node_reachable_twice_in_one_cascade_runs_once() -> TestResult {
    init_tracing();
    let log = ExecutionLog::new();
    let mut graph = TaskGraph::new();
    // A -> B, A -> C, B -> C: C is triggered by B (ready) and then by A.
    let a = add(&mut graph, &log, "A");
    let b = add(&mut graph, &log, "B");
    let c = add(&mut graph, &log, "C");
    graph.add_downstream(a, b)?;
    graph.add_downstream(a, c)?;
    graph.add_downstream(b, c)?;

    let report = graph.run(a)?;

    assert_eq!(log.names(), vec!["A", "B", "C"]);
    assert_eq!(report.skipped, 1);
    Ok(())
}

#[test]
fn rerunning_a_finished_source_does_nothing() -> TestResult {
    init_tracing();
    let log = ExecutionLog::new();
    let (mut graph, [a, ..]) = diamond(&log);

    graph.run(a)?;
    let second = graph.run(a)?;

    assert!(second.executed.is_empty());
    assert_eq!(second.skipped, 1);
    assert_eq!(log.names().len(), 4);
    Ok(())
}

#[test]
fn join_of_two_sources_runs_after_the_second_source() -> TestResult {
    init_tracing();
    let log = ExecutionLog::new();
    let mut graph = TaskGraph::new();
    let s1 = add(&mut graph, &log, "S1");
    let s2 = add(&mut graph, &log, "S2");
    let join = add(&mut graph, &log, "J");
    graph.add_downstream(s1, join)?;
    graph.add_downstream(s2, join)?;

    let first = graph.run(s1)?;
    assert_eq!(first.executed, vec![s1]);
    assert!(!graph.is_finished(join)?);

    let second = graph.run(s2)?;
    assert_eq!(second.executed, vec![s2, join]);
    assert_eq!(log.count("J"), 1);
    Ok(())
}

#[test]
fn run_sources_triggers_every_source_in_insertion_order() -> TestResult {
    init_tracing();
    let log = ExecutionLog::new();
    let mut graph = TaskGraph::new();
    let s1 = add(&mut graph, &log, "S1");
    let x = add(&mut graph, &log, "X");
    let s2 = add(&mut graph, &log, "S2");
    graph.add_downstream(s1, x)?;

    let report = graph.run_sources()?;

    assert_eq!(report.executed, vec![s1, x, s2]);
    assert_eq!(graph.finished_nodes(), vec![s1, x, s2]);
    Ok(())
}

#[test]
fn cascade_follows_depth_first_order() -> TestResult {
    init_tracing();
    let log = ExecutionLog::new();
    let mut graph = TaskGraph::new();
    // root -> l -> ll, root -> r: l's subtree completes before r starts.
    let root = add(&mut graph, &log, "root");
    let l = add(&mut graph, &log, "l");
    let ll = add(&mut graph, &log, "ll");
    let r = add(&mut graph, &log, "r");
    graph.add_downstream(root, l)?;
    graph.add_downstream(root, r)?;
    graph.add_downstream(l, ll)?;

    graph.run(root)?;

    assert_eq!(log.names(), vec!["root", "l", "ll", "r"]);
    Ok(())
}

#[test]
fn long_chain_does_not_exhaust_the_stack() -> TestResult {
    init_tracing();
    let log = ExecutionLog::new();
    let mut graph = TaskGraph::new();
    let ids: Vec<NodeId> = (0..20_000)
        .map(|i| add(&mut graph, &log, &format!("n{i}")))
        .collect();
    graph.add_serial_pipeline(ids[0], &ids[1..])?;

    let report = graph.run(ids[0])?;

    assert_eq!(report.executed.len(), ids.len());
    assert!(graph.is_finished(ids[ids.len() - 1])?);
    Ok(())
}
