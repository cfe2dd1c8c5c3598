// tests/linkage.rs

mod common;
use crate::common::init_tracing;
use crate::common::tasks::{ExecutionLog, RecordingTask};

use std::error::Error;

use taskdag::dag::TaskGraph;
use taskdag::errors::DagError;
use taskdag::params::ParameterStore;

type TestResult = Result<(), Box<dyn Error>>;

fn graph_with(names: &[&str]) -> (TaskGraph, Vec<taskdag::dag::NodeId>) {
    let log = ExecutionLog::new();
    let mut graph = TaskGraph::new();
    let ids = names
        .iter()
        .map(|n| graph.add_node(*n, RecordingTask::new(&log).into_arc(), ParameterStore::new()))
        .collect();
    (graph, ids)
}

#[test]
fn add_downstream_links_both_directions() -> TestResult {
    init_tracing();
    let (mut graph, ids) = graph_with(&["A", "B"]);

    graph.add_downstream(ids[0], ids[1])?;

    assert_eq!(graph.downstream_of(ids[0])?, &[ids[1]]);
    assert_eq!(graph.upstream_of(ids[1])?, &[ids[0]]);
    assert!(graph.upstream_of(ids[0])?.is_empty());
    assert!(graph.downstream_of(ids[1])?.is_empty());
    Ok(())
}

#[test]
fn add_downstream_twice_leaves_a_single_edge() -> TestResult {
    init_tracing();
    let (mut graph, ids) = graph_with(&["A", "B"]);

    graph.add_downstream(ids[0], ids[1])?;
    graph.add_downstream(ids[0], ids[1])?;

    assert_eq!(graph.downstream_of(ids[0])?.len(), 1);
    assert_eq!(graph.upstream_of(ids[1])?.len(), 1);
    Ok(())
}

#[test]
fn serial_pipeline_builds_a_linear_chain() -> TestResult {
    init_tracing();
    let (mut graph, ids) = graph_with(&["head", "n1", "n2", "n3"]);

    graph.add_serial_pipeline(ids[0], &ids[1..])?;

    assert_eq!(graph.downstream_of(ids[0])?, &[ids[1]]);
    assert_eq!(graph.downstream_of(ids[1])?, &[ids[2]]);
    assert_eq!(graph.downstream_of(ids[2])?, &[ids[3]]);
    assert!(graph.downstream_of(ids[3])?.is_empty());
    assert_eq!(graph.upstream_of(ids[3])?, &[ids[2]]);
    assert_eq!(graph.source_nodes(), vec![ids[0]]);
    Ok(())
}

#[test]
fn serial_pipeline_with_empty_chain_is_a_no_op() -> TestResult {
    init_tracing();
    let (mut graph, ids) = graph_with(&["only"]);

    graph.add_serial_pipeline(ids[0], &[])?;

    assert!(graph.downstream_of(ids[0])?.is_empty());
    Ok(())
}

#[test]
fn neighbour_order_follows_insertion() -> TestResult {
    init_tracing();
    let (mut graph, ids) = graph_with(&["root", "c", "a", "b"]);

    graph.add_downstream(ids[0], ids[1])?;
    graph.add_downstream(ids[0], ids[2])?;
    graph.add_downstream(ids[0], ids[3])?;

    assert_eq!(graph.downstream_of(ids[0])?, &[ids[1], ids[2], ids[3]]);
    Ok(())
}

#[test]
fn self_edge_is_rejected() {
    init_tracing();
    let (mut graph, ids) = graph_with(&["A"]);

    match graph.add_downstream(ids[0], ids[0]) {
        Err(DagError::Cycle(msg)) => assert!(msg.contains("'A' -> 'A'")),
        other => panic!("expected Cycle error, got {:?}", other),
    }
    assert!(graph.downstream_of(ids[0]).unwrap().is_empty());
}

#[test]
fn edge_closing_a_cycle_is_rejected_and_graph_unchanged() -> TestResult {
    init_tracing();
    let (mut graph, ids) = graph_with(&["A", "B", "C"]);

    graph.add_serial_pipeline(ids[0], &[ids[1], ids[2]])?;

    let result = graph.add_downstream(ids[2], ids[0]);
    assert!(matches!(result, Err(DagError::Cycle(_))));

    assert!(graph.downstream_of(ids[2])?.is_empty());
    assert!(graph.upstream_of(ids[0])?.is_empty());
    assert_eq!(graph.topological_order()?, vec![ids[0], ids[1], ids[2]]);
    Ok(())
}

#[test]
fn finding_nodes_by_label() {
    init_tracing();
    let (graph, ids) = graph_with(&["extract", "load"]);

    assert_eq!(graph.find("load"), Some(ids[1]));
    assert_eq!(graph.find("missing"), None);
    assert_eq!(graph.len(), 2);
}
