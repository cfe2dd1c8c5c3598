// tests/failure_handling.rs

mod common;
use crate::common::init_tracing;
use crate::common::tasks::{ExecutionLog, RecordingTask};

use std::error::Error;

use taskdag::dag::{NodeId, TaskGraph};
use taskdag::errors::DagError;
use taskdag::params::ParameterStore;

type TestResult = Result<(), Box<dyn Error>>;

fn add(graph: &mut TaskGraph, task: RecordingTask, name: &str) -> NodeId {
    graph.add_node(name, task.into_arc(), ParameterStore::new())
}

#[test]
fn failure_halts_the_chain() -> TestResult {
    init_tracing();
    let log = ExecutionLog::new();
    let mut graph = TaskGraph::new();
    let a = add(&mut graph, RecordingTask::new(&log), "A");
    let b = add(&mut graph, RecordingTask::new(&log).failing("disk full"), "B");
    let c = add(&mut graph, RecordingTask::new(&log), "C");
    graph.add_serial_pipeline(a, &[b, c])?;

    let err = graph.run(a).unwrap_err();

    match &err {
        DagError::TaskFailed { node, source } => {
            assert_eq!(node, "B");
            assert_eq!(source.to_string(), "disk full");
        }
        other => panic!("expected TaskFailed, got {:?}", other),
    }
    assert_eq!(err.to_string(), "task 'B' failed: disk full");

    assert!(graph.is_finished(a)?);
    assert!(!graph.is_finished(b)?);
    assert!(!graph.is_finished(c)?);
    assert_eq!(log.names(), vec!["A", "B"]);
    Ok(())
}

#[test]
fn siblings_finished_before_the_failure_stay_finished() -> TestResult {
    init_tracing();
    let log = ExecutionLog::new();
    let mut graph = TaskGraph::new();
    // root -> ok -> ok_child, root -> bad -> bad_child, root -> never
    let root = add(&mut graph, RecordingTask::new(&log), "root");
    let ok = add(&mut graph, RecordingTask::new(&log), "ok");
    let ok_child = add(&mut graph, RecordingTask::new(&log), "ok_child");
    let bad = add(&mut graph, RecordingTask::new(&log).failing("boom"), "bad");
    let bad_child = add(&mut graph, RecordingTask::new(&log), "bad_child");
    let never = add(&mut graph, RecordingTask::new(&log), "never");
    graph.add_serial_pipeline(root, &[ok, ok_child])?;
    graph.add_serial_pipeline(root, &[bad, bad_child])?;
    graph.add_downstream(root, never)?;

    assert!(graph.run(root).is_err());

    assert_eq!(graph.finished_nodes(), vec![root, ok, ok_child]);
    assert!(!graph.is_finished(bad_child)?);
    // The cascade stops entirely, so later siblings are not reached either.
    assert!(!graph.is_finished(never)?);
    Ok(())
}

#[test]
fn failure_in_one_source_stops_run_sources() -> TestResult {
    init_tracing();
    let log = ExecutionLog::new();
    let mut graph = TaskGraph::new();
    let s1 = add(&mut graph, RecordingTask::new(&log).failing("bad input"), "S1");
    let s2 = add(&mut graph, RecordingTask::new(&log), "S2");

    assert!(matches!(graph.run_sources(), Err(DagError::TaskFailed { .. })));
    assert!(!graph.is_finished(s1)?);
    assert!(!graph.is_finished(s2)?);
    Ok(())
}

#[test]
fn failed_node_can_be_retriggered_by_the_caller() -> TestResult {
    init_tracing();
    let log = ExecutionLog::new();
    let mut graph = TaskGraph::new();
    let a = add(&mut graph, RecordingTask::new(&log).failing("flaky"), "A");

    assert!(graph.run(a).is_err());
    assert!(graph.run(a).is_err());

    // Nothing is retried automatically: each call is one attempt.
    assert_eq!(log.count("A"), 2);
    assert!(!graph.is_finished(a)?);
    Ok(())
}
