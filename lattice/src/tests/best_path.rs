use super::insert_word;
use crate::errors::LatticeError;
use crate::{Lattice, NodeId};

/// 接続コストを左右IDの差とする簡易なビタビ探索。
///
/// 位置の昇順に各ノードの`path_cost`を求め、文末から最良パスを書き戻します。
/// 文頭ノードは位置0の左側ノードとして扱います。
fn decode(lattice: &mut Lattice) -> Option<i32> {
    let bos = lattice.begin_sentinel()?;
    let eos = lattice.end_sentinel()?;
    let conn = |l: u16, r: u16| (i32::from(l) - i32::from(r)).abs();

    // (node, best left node)
    let mut back: Vec<(NodeId, NodeId)> = vec![];
    let reached = |back: &[(NodeId, NodeId)], id: NodeId| back.iter().any(|&(n, _)| n == id);

    for pos in 0..=lattice.len() {
        let mut rnodes: Vec<NodeId> = lattice
            .begin_chain(pos)
            .map(|(id, _)| id)
            .filter(|&id| id != bos)
            .collect();
        if pos == lattice.len() {
            rnodes.push(eos);
        }
        let mut lnodes: Vec<NodeId> = lattice
            .end_chain(pos)
            .map(|(id, _)| id)
            .filter(|&id| reached(&back, id))
            .collect();
        if pos == 0 {
            lnodes.push(bos);
        }

        for rnode in rnodes {
            let left_id = lattice[rnode].left_id;
            let best = lnodes
                .iter()
                .map(|&id| (id, lattice[id].path_cost + conn(lattice[id].right_id, left_id)))
                .min_by_key(|&(_, cost)| cost);
            if let Some((lid, cost)) = best {
                let word_cost = lattice[rnode].word_cost;
                lattice.node_mut(rnode).path_cost = cost + word_cost;
                back.push((rnode, lid));
            }
        }
    }

    let mut cur = eos;
    while cur != bos {
        let prev = back.iter().find(|&&(n, _)| n == cur).map(|&(_, l)| l)?;
        lattice.connect(prev, cur).unwrap();
        cur = prev;
    }
    Some(lattice[eos].path_cost)
}

fn add(lattice: &mut Lattice, start: usize, key: &str, value: &str, cost: i32) -> NodeId {
    let node = insert_word(lattice, start, key, value);
    lattice.node_mut(node).word_cost = cost;
    node
}

#[test]
fn test_decode_writes_best_path() {
    let mut lattice = Lattice::new();
    lattice.set_key("きょうは");
    add(&mut lattice, 0, "き", "木", 50);
    add(&mut lattice, 1, "ょう", "ょう", 100);
    let kyou = add(&mut lattice, 0, "きょう", "今日", 10);
    let ha = add(&mut lattice, 3, "は", "は", 5);

    assert_eq!(decode(&mut lattice), Some(15));

    let values: Vec<_> = lattice
        .best_path()
        .filter(|(_, n)| !n.is_sentinel())
        .map(|(_, n)| n.value.as_str())
        .collect();
    assert_eq!(values, ["今日", "は"]);

    let bos = lattice.begin_sentinel().unwrap();
    let eos = lattice.end_sentinel().unwrap();
    assert_eq!(lattice[bos].best_next, Some(kyou));
    assert_eq!(lattice[kyou].best_prev, Some(bos));
    assert_eq!(lattice[ha].best_next, Some(eos));
    assert_eq!(lattice[eos].best_prev, Some(ha));
    assert_eq!(lattice.best_path().last().map(|(id, _)| id), Some(eos));
}

#[test]
fn test_reset_costs() {
    let mut lattice = Lattice::new();
    lattice.set_key("ab");
    add(&mut lattice, 0, "ab", "AB", 3);
    decode(&mut lattice).unwrap();
    assert_eq!(lattice.best_path().count(), 3);

    lattice.reset_costs();
    assert_eq!(lattice.best_path().count(), 1);
    assert!(lattice
        .nodes()
        .all(|(_, n)| n.path_cost == 0 && n.best_prev.is_none() && n.best_next.is_none()));
    // Word costs set by the producer survive.
    assert!(lattice.nodes().any(|(_, n)| n.word_cost == 3));
}

#[test]
fn test_best_path_without_key() {
    let lattice = Lattice::new();
    assert_eq!(lattice.best_path().count(), 0);
}

#[test]
fn test_best_path_terminates_on_cycle() {
    let mut lattice = Lattice::new();
    lattice.set_key("ab");
    let a = insert_word(&mut lattice, 0, "a", "A");
    let bos = lattice.begin_sentinel().unwrap();
    lattice.connect(bos, a).unwrap();
    lattice.connect(a, bos).unwrap();
    assert_eq!(lattice.best_path().count(), lattice.num_nodes());
}

#[test]
fn test_connect_stale() {
    let mut lattice = Lattice::new();
    lattice.set_key("ab");
    let stale = lattice.new_node();
    lattice.set_key("ab");
    let bos = lattice.begin_sentinel().unwrap();
    assert_eq!(lattice.connect(bos, stale), Err(LatticeError::StaleNode(stale)));
    assert_eq!(lattice.connect(stale, bos), Err(LatticeError::StaleNode(stale)));
    assert_eq!(lattice[bos].best_next, None);
    assert_eq!(lattice[bos].best_prev, None);
}
