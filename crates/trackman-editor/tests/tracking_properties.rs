//! Property tests for the edit tracker, bulk toggles and commit reducer.
//!
//! Each property drives a receive-port row set (a mix of one-way and two-way ports, so
//! some cells are locked) through a random sequence of edits and checks an invariant
//! that must hold after every sequence.

use proptest::prelude::*;
use trackman_editor::{CatalogRecord, RowSet};
use trackman_schema::{columns_for, ArtifactKind, FlagSchema};
use trackman_test_utils::{record, row_set};

const ROWS: usize = 4;
const KIND: ArtifactKind = ArtifactKind::ReceivePort;

#[derive(Debug, Clone)]
enum Op {
    Set(usize, usize, bool),
    ToggleColumn(usize),
    ToggleRow(usize),
}

fn columns() -> usize {
    columns_for(KIND).len()
}

fn id(index: usize) -> String {
    format!("RP.{index}")
}

fn key(index: usize) -> &'static str {
    columns_for(KIND)[index].key
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..ROWS, 0..columns(), any::<bool>()).prop_map(|(r, c, v)| Op::Set(r, c, v)),
        (0..columns()).prop_map(Op::ToggleColumn),
        (0..ROWS).prop_map(Op::ToggleRow),
    ]
}

fn records_strategy() -> impl Strategy<Value = Vec<CatalogRecord>> {
    prop::collection::vec((0u32..=0xFF, any::<bool>()), ROWS).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(index, (bits, two_way))| record(&id(index), bits, two_way))
            .collect()
    })
}

fn apply(set: &mut RowSet, op: &Op) {
    match *op {
        Op::Set(r, c, value) => {
            set.set_cell(&id(r), key(c), value).unwrap();
        }
        Op::ToggleColumn(c) => {
            set.toggle_column(key(c)).unwrap();
        }
        Op::ToggleRow(r) => {
            set.toggle_row(&id(r)).unwrap();
        }
    }
}

fn snapshot(set: &RowSet) -> Vec<Vec<bool>> {
    set.rows().iter().map(|row| row.values()).collect()
}

proptest! {
    #[test]
    fn locked_cells_never_change(
        records in records_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut set = row_set(KIND, records);
        let before = snapshot(&set);

        for op in &ops {
            apply(&mut set, op);
        }

        for (row, initial) in set.rows().iter().zip(&before) {
            for ((_, cell), was) in row.cells().zip(initial) {
                if cell.is_locked() {
                    prop_assert_eq!(cell.current(), *was);
                    prop_assert_eq!(cell.baseline(), None);
                }
            }
        }
    }

    #[test]
    fn dirty_means_differs_from_load_value(
        records in records_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut set = row_set(KIND, records);
        let before = snapshot(&set);

        for op in &ops {
            apply(&mut set, op);
        }

        for (row, initial) in set.rows().iter().zip(&before) {
            for ((_, cell), was) in row.cells().zip(initial) {
                prop_assert_eq!(cell.is_dirty(), cell.current() != *was);
                if let Some(baseline) = cell.baseline() {
                    prop_assert_eq!(baseline, *was);
                }
            }
        }
    }

    #[test]
    fn pending_writes_cover_exactly_the_dirty_rows(
        records in records_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut set = row_set(KIND, records);
        for op in &ops {
            apply(&mut set, op);
        }

        let writes = set.pending_writes();
        let dirty: Vec<_> = set.rows().iter().filter(|row| row.is_dirty()).collect();
        prop_assert_eq!(writes.len(), dirty.len());

        let schema = FlagSchema::for_kind(KIND);
        for (write, row) in writes.iter().zip(dirty) {
            prop_assert_eq!(&write.id, row.id());
            for (index, (_, cell)) in row.cells().enumerate() {
                prop_assert_eq!(write.flag_bits & schema.bit(index) != 0, cell.current());
            }
        }
    }

    #[test]
    fn flipping_a_cell_an_even_number_of_times_is_clean(
        records in records_strategy(),
        row in 0..ROWS,
        column in 0..8usize,
        flips in (1..6usize).prop_map(|n| n * 2),
    ) {
        let mut set = row_set(KIND, records);
        let initial = set.rows()[row].cell_at(column).unwrap().current();

        for _ in 0..flips {
            let current = set.rows()[row].cell_at(column).unwrap().current();
            set.set_cell(&id(row), key(column), !current).unwrap();
        }

        let cell = set.rows()[row].cell_at(column).unwrap();
        prop_assert_eq!(cell.current(), initial);
        prop_assert!(!cell.is_dirty());
        if !cell.is_locked() {
            prop_assert_eq!(cell.baseline(), Some(initial));
        }
    }

    #[test]
    fn second_column_toggle_settles_on_reference_value(
        records in records_strategy(),
        column in 0..8usize,
    ) {
        let mut set = row_set(KIND, records);
        prop_assume!(!set.rows()[0].cell_at(column).unwrap().is_locked());
        let before = snapshot(&set);
        let reference = before[0][column];

        set.toggle_column(key(column)).unwrap();
        set.toggle_column(key(column)).unwrap();

        for (row, initial) in set.rows().iter().zip(&before) {
            let cell = row.cell_at(column).unwrap();
            if cell.is_locked() {
                prop_assert_eq!(cell.current(), initial[column]);
            } else {
                prop_assert_eq!(cell.current(), reference);
                prop_assert_eq!(cell.is_dirty(), initial[column] != reference);
            }
        }
    }

    #[test]
    fn second_row_toggle_settles_on_reference_value(
        records in records_strategy(),
        row in 0..ROWS,
    ) {
        let mut set = row_set(KIND, records);
        prop_assume!(!set.rows()[row].cell_at(0).unwrap().is_locked());
        let before = set.rows()[row].values();
        let reference = before[0];

        set.toggle_row(&id(row)).unwrap();
        set.toggle_row(&id(row)).unwrap();

        for ((_, cell), initial) in set.rows()[row].cells().zip(&before) {
            if cell.is_locked() {
                prop_assert_eq!(cell.current(), *initial);
            } else {
                prop_assert_eq!(cell.current(), reference);
                prop_assert_eq!(cell.is_dirty(), *initial != reference);
            }
        }
    }

    #[test]
    fn commit_then_edit_recaptures_from_committed_value(
        records in records_strategy(),
        ops in prop::collection::vec(op_strategy(), 1..20),
        later in op_strategy(),
    ) {
        let mut set = row_set(KIND, records);
        for op in &ops {
            apply(&mut set, op);
        }

        let ids: Vec<_> = set.rows().iter().map(|row| row.id().clone()).collect();
        set.mark_committed(&ids);
        let committed = snapshot(&set);

        prop_assert!(!set.is_dirty());
        prop_assert!(set
            .rows()
            .iter()
            .all(|row| row.cells().all(|(_, cell)| cell.baseline().is_none())));

        apply(&mut set, &later);
        for (row, was) in set.rows().iter().zip(&committed) {
            for ((_, cell), value) in row.cells().zip(was) {
                if let Some(baseline) = cell.baseline() {
                    prop_assert_eq!(baseline, *value);
                }
            }
        }
    }
}
