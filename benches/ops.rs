// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use galatea::history::History;
use galatea::merge::{apply_diff, DiffEdge, DiffNode, DiffNodeData, DiffPosition, MergeDiff, MergeOutcome};
use galatea::model::{GraphStore, IdGenerator, Node, NodeId, Position};
use galatea::ops;

// Benchmark identity (keep stable):
// - Group name in this file: `merge.apply_diff`
// - Case IDs (the string after the `/`) must remain stable across refactors so
//   results stay comparable over time (e.g. `add_single`, `add_batch_200`).
// - If implementations move/deduplicate, update the wiring but do not rename
//   group or case IDs.
fn checksum_outcome(outcome: &MergeOutcome) -> u64 {
    let mut acc = 0u64;
    acc = acc.wrapping_mul(131).wrapping_add(outcome.nodes_added as u64);
    acc = acc
        .wrapping_mul(131)
        .wrapping_add(outcome.nodes_modified as u64);
    acc = acc
        .wrapping_mul(131)
        .wrapping_add(outcome.nodes_removed as u64);
    acc = acc.wrapping_mul(131).wrapping_add(outcome.edges_added as u64);
    acc = acc
        .wrapping_mul(131)
        .wrapping_add(outcome.edges_removed as u64);
    acc = acc.wrapping_mul(131).wrapping_add(outcome.skipped as u64);
    acc
}

/// Deterministic medium graph: `group_count` groups each holding
/// `members_per_group` leaves, plus a chain of edges between the leaves.
fn medium_graph(group_count: usize, members_per_group: usize) -> GraphStore {
    let mut graph = GraphStore::default();
    let mut previous: Option<NodeId> = None;

    for group_index in 0..group_count {
        let group_id =
            NodeId::new(format!("bench_group_{group_index:03}")).expect("group id");
        let group = Node::new_group(
            format!("Group {group_index}"),
            Position::new(group_index as f64 * 400.0, 0.0),
        );
        ops::add_node(&mut graph, group_id.clone(), group).expect("add group");

        for member_index in 0..members_per_group {
            let node_id = NodeId::new(format!(
                "bench_node_{group_index:03}_{member_index:03}"
            ))
            .expect("node id");
            let mut node = Node::new(
                format!("Svc {group_index}/{member_index}"),
                "service",
                Position::new(
                    group_index as f64 * 400.0 + member_index as f64 * 60.0,
                    80.0,
                ),
            );
            node.set_parent_id(Some(group_id.clone()));
            ops::add_node(&mut graph, node_id.clone(), node).expect("add node");

            if let Some(previous) = previous.take() {
                let edge_id = galatea::model::EdgeId::new(format!(
                    "bench_edge_{group_index:03}_{member_index:03}"
                ))
                .expect("edge id");
                ops::add_edge(
                    &mut graph,
                    edge_id,
                    galatea::model::Edge::new(previous, node_id.clone()),
                )
                .expect("add edge");
            }
            previous = Some(node_id);
        }
    }

    graph
}

fn add_diff(count: usize) -> MergeDiff {
    let mut diff = MergeDiff::default();
    for idx in 0..count {
        diff.nodes_to_add.push(DiffNode {
            id: format!("merge_node_{idx:06}"),
            position: DiffPosition {
                x: idx as f64 * 30.0,
                y: 600.0,
            },
            data: DiffNodeData {
                label: format!("Merged {idx}"),
                node_type: "service".to_owned(),
                ..DiffNodeData::default()
            },
            ..DiffNode::default()
        });
        if idx > 0 {
            diff.edges_to_add.push(DiffEdge {
                id: format!("merge_edge_{idx:06}"),
                source: format!("merge_node_{:06}", idx - 1),
                target: format!("merge_node_{idx:06}"),
                ..DiffEdge::default()
            });
        }
    }
    diff
}

fn delete_diff(graph: &GraphStore) -> MergeDiff {
    let mut diff = MergeDiff::default();
    diff.nodes_to_delete = graph
        .nodes()
        .iter()
        .filter(|(_, node)| node.is_group())
        .map(|(id, _)| id.as_str().to_owned())
        .collect();
    diff
}

fn benches_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge.apply_diff");

    let template = medium_graph(8, 25);

    for (case, count) in [("add_single", 1), ("add_batch_10", 10), ("add_batch_200", 200)] {
        let diff = add_diff(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(case, {
            let template = template.clone();
            let diff = diff.clone();
            move |b| {
                b.iter_batched(
                    || (template.clone(), IdGenerator::new(), History::new()),
                    |(mut graph, mut ids, mut history)| {
                        let outcome =
                            apply_diff(&mut graph, &mut ids, &mut history, black_box(&diff));
                        black_box(checksum_outcome(&outcome))
                    },
                    BatchSize::SmallInput,
                )
            }
        });
    }

    let cascade = delete_diff(&template);
    group.throughput(Throughput::Elements(cascade.nodes_to_delete.len() as u64));
    group.bench_function("delete_cascade", {
        let template = template.clone();
        move |b| {
            b.iter_batched(
                || (template.clone(), IdGenerator::new(), History::new()),
                |(mut graph, mut ids, mut history)| {
                    let outcome =
                        apply_diff(&mut graph, &mut ids, &mut history, black_box(&cascade));
                    black_box(checksum_outcome(&outcome))
                },
                BatchSize::SmallInput,
            )
        }
    });

    group.finish();
}

criterion_group!(benches, benches_merge);
criterion_main!(benches);
