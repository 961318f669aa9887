//! Hand-written procedures that break the discipline

use super::*;
use revcheck::cells::{Change, ViolationKind};

fn violation(err: revcheck::Error) -> Violation {
    match err {
        revcheck::Error::Violation(v) => v,
        other => panic!("expected a violation, got {other:?}"),
    }
}

#[test]
fn legal_script_passes() {
    let vars = Vars::new();
    let steps = with_cells(&vars, |cells, x_, y_, _| {
        // x is only ever read
        let x = x_.get()?.load();
        y_.get()?.update(|y| *y += x);
        cells.advance()?;
        let x = x_.get()?.load();
        assert_eq!(x, 3);
        cells.advance()?;
        Ok(())
    })
    .unwrap();
    assert_eq!(steps, 2);
    assert_eq!(*vars.y.borrow(), 7);
}

#[test]
fn x_plus_equals_x_after_read_is_rejected() {
    let vars = Vars::new();
    let err = with_cells(&vars, |cells, x_, y_, _| {
        let x = x_.get()?.load();
        y_.get()?.update(|y| *y += x);
        cells.advance()?;
        x_.get()?.update(|x| *x *= 2);
        cells.advance()?;
        Ok(())
    })
    .unwrap_err();

    assert!(err.is_serious());
    let v = violation(err);
    assert_eq!(v.kind(), ViolationKind::UseBeforeMutate);
    assert_eq!(v.cell().to_string(), "main/x");
}

#[test]
fn swapping_a_moved_value_again_is_rejected() {
    let vars = Vars::new();
    let err = with_cells(&vars, |cells, x_, _, l_| {
        exchange(x_.get()?, l_.get_at(0)?);
        cells.advance()?;
        exchange(x_.get()?, l_.get_at(1)?);
        cells.advance()?;
        Ok(())
    })
    .unwrap_err();

    let v = violation(err);
    assert_eq!(v.kind(), ViolationKind::StaleRead);
    assert_eq!(v.cell().to_string(), "x");
}

#[test]
fn growing_a_list_after_reading_it_is_rejected() {
    let vars = Vars::new();
    let err = with_cells(&vars, |cells, _, _, l_| {
        let head = l_.get_at(0)?.load();
        cells.advance()?;
        l_.get_whole()?.borrow_mut().push(head);
        cells.advance()?;
        Ok(())
    })
    .unwrap_err();

    assert_eq!(
        violation(err),
        Violation::UseBeforeMutate {
            cell: revcheck::cells::CellPath::new("l").within("main"),
            change: Change::Resized { from: 3, to: 4 },
        }
    );
}

#[test]
fn indexing_after_a_resize_is_rejected() {
    let vars = Vars::new();
    let err = with_cells(&vars, |cells, _, _, l_| {
        l_.get_whole()?.borrow_mut().pop();
        cells.advance()?;
        l_.get_at(0)?;
        Ok(())
    })
    .unwrap_err();

    assert_eq!(violation(err).kind(), ViolationKind::SizeChanged);
}

#[test]
fn block_local_accumulator_is_checked_with_its_scope() {
    let vars = Vars::new();
    let err = with_cells(&vars, |cells, x_, _, _| {
        let t = RefCell::new(0i64);
        let t_ = ScalarCell::new("t", &t);
        let mut block = cells.nested("local t");
        block.push(&t_);

        assert_eq!(t_.get()?.load(), 0);
        block.advance()?;

        // Accumulating into the local after its read was certified.
        let x = x_.get()?.load();
        t_.get()?.update(|t| *t += x);
        block.advance()?;
        Ok(())
    })
    .unwrap_err();

    let v = violation(err);
    assert_eq!(v.cell().to_string(), "local t/t");
    assert_eq!(v.kind(), ViolationKind::UseBeforeMutate);
}
