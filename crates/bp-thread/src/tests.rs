//! Unit tests for bp-thread.
//!
//! These drive `BtHandle` and `RegisteredBThread` against hand-built
//! channels, playing the coordinator's role inline.

use bp_core::{BtId, SyncSpec, ThreadReport};
use crossbeam_channel::unbounded;

use crate::{BtError, BtHandle, IdleBehavior, RegisteredBThread};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
enum Tap {
    Hot,
    Cold,
}

// ── BtHandle ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod handle_tests {
    use super::*;

    #[test]
    fn sync_publishes_point_and_returns_delivered_event() {
        let (report_tx, report_rx) = unbounded();
        let (mail_tx, mail_rx) = unbounded();
        let mut bt = BtHandle::new(BtId(0), "t".into(), 0.0, report_tx, mail_rx);

        // Channels are unbounded, so the reply can be queued up front and the
        // whole exchange driven from one thread.
        mail_tx.send(Tap::Hot).unwrap();
        let event = bt
            .sync(SyncSpec::new().request(Tap::Hot).block(Tap::Cold))
            .unwrap();
        assert_eq!(event, Tap::Hot);
        assert_eq!(bt.last_event(), Some(&Tap::Hot));

        match report_rx.try_recv().unwrap() {
            ThreadReport::Synced(point) => {
                assert_eq!(point.sender, BtId(0));
                assert!(point.spec.request.contains(&Tap::Hot));
                assert!(point.spec.block.contains(&Tap::Cold));
                assert!(point.spec.wait_for.is_empty());
            }
            other => panic!("expected Synced, got {other:?}"),
        }
    }

    #[test]
    fn each_sync_replaces_the_standing_point() {
        let (report_tx, report_rx) = unbounded();
        let (mail_tx, mail_rx) = unbounded();
        let mut bt = BtHandle::new(BtId(1), "t".into(), 0.0, report_tx, mail_rx);

        mail_tx.send(Tap::Hot).unwrap();
        mail_tx.send(Tap::Cold).unwrap();
        bt.sync(SyncSpec::new().request(Tap::Hot)).unwrap();
        bt.sync(SyncSpec::new().request(Tap::Cold)).unwrap();
        assert_eq!(bt.last_event(), Some(&Tap::Cold));

        let points: Vec<_> = report_rx.try_iter().collect();
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn disconnected_mailbox_surfaces_as_error() {
        let (report_tx, _report_rx) = unbounded();
        let (mail_tx, mail_rx) = unbounded::<Tap>();
        let mut bt = BtHandle::new(BtId(0), "t".into(), 0.0, report_tx, mail_rx);

        drop(mail_tx);
        match bt.sync(SyncSpec::new().request(Tap::Hot)) {
            Err(BtError::Disconnected) => {}
            other => panic!("expected Disconnected, got {other:?}"),
        }
    }

    #[test]
    fn accessors_reflect_registration() {
        let (report_tx, _report_rx) = unbounded::<ThreadReport<Tap>>();
        let (_mail_tx, mail_rx) = unbounded();
        let bt = BtHandle::new(BtId(3), "observer".into(), 2.5, report_tx, mail_rx);
        assert_eq!(bt.id(), BtId(3));
        assert_eq!(bt.name(), "observer");
        assert_eq!(bt.priority(), 2.5);
        assert_eq!(bt.last_event(), None);
    }
}

// ── RegisteredBThread / runner ────────────────────────────────────────────────

#[cfg(test)]
mod runner_tests {
    use super::*;

    #[test]
    fn normal_return_sends_terminated() {
        let (report_tx, report_rx) = unbounded();
        let (_mail_tx, mail_rx) = unbounded::<Tap>();
        let rt = RegisteredBThread::new(
            BtId(0),
            "idle".into(),
            0.0,
            Box::new(IdleBehavior),
            mail_rx,
            report_tx,
        );
        rt.spawn().unwrap().join().unwrap();
        assert_eq!(
            report_rx.try_recv().unwrap(),
            ThreadReport::Terminated { thread: BtId(0) }
        );
    }

    #[test]
    fn user_error_sends_failed_with_reason() {
        let (report_tx, report_rx) = unbounded();
        let (_mail_tx, mail_rx) = unbounded::<Tap>();
        let rt = RegisteredBThread::new(
            BtId(2),
            "failing".into(),
            0.0,
            Box::new(|_bt: &mut BtHandle<Tap>| Err(BtError::msg("tap already open"))),
            mail_rx,
            report_tx,
        );
        rt.spawn().unwrap().join().unwrap();
        match report_rx.try_recv().unwrap() {
            ThreadReport::Failed { thread, reason } => {
                assert_eq!(thread, BtId(2));
                assert!(reason.contains("tap already open"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn panic_sends_failed_with_message() {
        let (report_tx, report_rx) = unbounded();
        let (_mail_tx, mail_rx) = unbounded::<Tap>();
        let rt = RegisteredBThread::new(
            BtId(1),
            "panicking".into(),
            0.0,
            Box::new(|_bt: &mut BtHandle<Tap>| panic!("boom")),
            mail_rx,
            report_tx,
        );
        rt.spawn().unwrap().join().unwrap();
        match report_rx.try_recv().unwrap() {
            ThreadReport::Failed { thread, reason } => {
                assert_eq!(thread, BtId(1));
                assert!(reason.contains("boom"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn shutdown_disconnect_exits_without_report() {
        let (report_tx, report_rx) = unbounded();
        let (mail_tx, mail_rx) = unbounded::<Tap>();
        let rt = RegisteredBThread::new(
            BtId(0),
            "waiter".into(),
            0.0,
            Box::new(|bt: &mut BtHandle<Tap>| {
                bt.sync(SyncSpec::new().request(Tap::Hot))?;
                Ok(())
            }),
            mail_rx,
            report_tx,
        );
        let handle = rt.spawn().unwrap();

        // Wait for the sync point, then shut down by dropping the mailbox.
        match report_rx.recv().unwrap() {
            ThreadReport::Synced(point) => assert_eq!(point.sender, BtId(0)),
            other => panic!("expected Synced, got {other:?}"),
        }
        drop(mail_tx);
        handle.join().unwrap();

        // Coordinated shutdown is silent: no Terminated, no Failed.
        assert!(report_rx.try_recv().is_err());
    }
}
