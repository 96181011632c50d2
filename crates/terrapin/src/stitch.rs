use std::collections::VecDeque;
use std::mem;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use crate::Result;
use crate::decode::{arc_slot, position_xy};
use crate::topology::Topology;

/// Pre-transform endpoint coordinates, bit-exact. Negative zero folds into
/// zero so that `-0` and `0` key the same endpoint.
type EndpointKey = (u64, u64);

struct Fragment {
    items: VecDeque<i32>,
    start: EndpointKey,
    end: EndpointKey,
}

/// Chains arcs that share endpoints into maximal fragments.
///
/// This is a port of topojson-client's `stitch`: collapsed arcs are handled
/// first since other arcs may subsume them, fragments grow through two
/// insertion-ordered endpoint maps, and arcs that never joined a fragment
/// come out last as singletons.
pub(crate) fn stitch(topology: &Topology, mut arcs: Vec<i32>) -> Result<Vec<VecDeque<i32>>> {
    let mut slab: Vec<Fragment> = Vec::new();
    let mut by_start: IndexMap<EndpointKey, usize> = IndexMap::new();
    let mut by_end: IndexMap<EndpointKey, usize> = IndexMap::new();
    let mut stitched: FxHashSet<usize> = FxHashSet::default();
    let mut fragments: Vec<VecDeque<i32>> = Vec::new();

    let mut collapsed_end = 0;
    for j in 0..arcs.len() {
        let arc = &topology.arcs[arc_slot(arcs[j])];
        if arc.len() == 2 {
            let (dx, dy) = position_xy(&arc[1])?;
            if dx == 0.0 && dy == 0.0 {
                arcs.swap(collapsed_end, j);
                collapsed_end += 1;
            }
        }
    }

    for &index in &arcs {
        let (start, end) = ends(topology, index)?;
        if let Some(&f_idx) = by_end.get(&start) {
            let f_end = slab[f_idx].end;
            by_end.shift_remove(&f_end);
            slab[f_idx].items.push_back(index);
            slab[f_idx].end = end;
            if let Some(&g_idx) = by_start.get(&end) {
                let g_start = slab[g_idx].start;
                by_start.shift_remove(&g_start);
                if g_idx == f_idx {
                    let (f_start, f_end) = (slab[f_idx].start, slab[f_idx].end);
                    by_start.insert(f_start, f_idx);
                    by_end.insert(f_end, f_idx);
                } else {
                    let moved = mem::take(&mut slab[g_idx].items);
                    let g_end = slab[g_idx].end;
                    let f = &mut slab[f_idx];
                    f.items.extend(moved);
                    f.end = g_end;
                    by_start.insert(f.start, f_idx);
                    by_end.insert(f.end, f_idx);
                }
            } else {
                let f = &slab[f_idx];
                by_start.insert(f.start, f_idx);
                by_end.insert(f.end, f_idx);
            }
        } else if let Some(&f_idx) = by_start.get(&end) {
            let f_start = slab[f_idx].start;
            by_start.shift_remove(&f_start);
            slab[f_idx].items.push_front(index);
            slab[f_idx].start = start;
            if let Some(&g_idx) = by_end.get(&start) {
                let g_end = slab[g_idx].end;
                by_end.shift_remove(&g_end);
                if g_idx == f_idx {
                    let (f_start, f_end) = (slab[f_idx].start, slab[f_idx].end);
                    by_start.insert(f_start, f_idx);
                    by_end.insert(f_end, f_idx);
                } else {
                    let moved = mem::take(&mut slab[f_idx].items);
                    let f_end = slab[f_idx].end;
                    let g = &mut slab[g_idx];
                    g.items.extend(moved);
                    g.end = f_end;
                    by_start.insert(g.start, g_idx);
                    by_end.insert(g.end, g_idx);
                }
            } else {
                let f = &slab[f_idx];
                by_start.insert(f.start, f_idx);
                by_end.insert(f.end, f_idx);
            }
        } else {
            let f_idx = slab.len();
            slab.push(Fragment {
                items: VecDeque::from([index]),
                start,
                end,
            });
            by_start.insert(start, f_idx);
            by_end.insert(end, f_idx);
        }
    }

    flush(&by_end, &mut by_start, &mut slab, &mut stitched, &mut fragments);
    flush(&by_start, &mut by_end, &mut slab, &mut stitched, &mut fragments);
    for &index in &arcs {
        if !stitched.contains(&arc_slot(index)) {
            fragments.push(VecDeque::from([index]));
        }
    }
    Ok(fragments)
}

fn flush(
    source: &IndexMap<EndpointKey, usize>,
    other: &mut IndexMap<EndpointKey, usize>,
    slab: &mut [Fragment],
    stitched: &mut FxHashSet<usize>,
    fragments: &mut Vec<VecDeque<i32>>,
) {
    for &f_idx in source.values() {
        let start = slab[f_idx].start;
        other.shift_remove(&start);
        let items = mem::take(&mut slab[f_idx].items);
        for &index in &items {
            stitched.insert(arc_slot(index));
        }
        fragments.push(items);
    }
}

fn ends(topology: &Topology, index: i32) -> Result<(EndpointKey, EndpointKey)> {
    let arc = &topology.arcs[arc_slot(index)];
    let first = match arc.first() {
        Some(position) => position_xy(position)?,
        None => (0.0, 0.0),
    };
    let last = if topology.transform.is_some() {
        let (mut x, mut y) = (0.0_f64, 0.0_f64);
        for position in arc {
            let (dx, dy) = position_xy(position)?;
            x += dx;
            y += dy;
        }
        (x, y)
    } else {
        match arc.last() {
            Some(position) => position_xy(position)?,
            None => (0.0, 0.0),
        }
    };
    Ok(if index < 0 {
        (key(last), key(first))
    } else {
        (key(first), key(last))
    })
}

fn key((x, y): (f64, f64)) -> EndpointKey {
    (component(x), component(y))
}

fn component(v: f64) -> u64 {
    if v == 0.0 { 0.0_f64.to_bits() } else { v.to_bits() }
}
