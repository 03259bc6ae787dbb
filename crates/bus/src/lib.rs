use core_types::NavState;
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    // UI -> browser view
    Follow { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    // Browser view -> shell
    LoadStart {
        url: String,
    },
    LoadEnd {
        url: String,
    },
    LoadError {
        url: String,
        description: String,
    },
    NavigationStateChange(NavState),
}

pub struct Bus {
    pub cmd_tx: Sender<ViewCommand>,
    pub evt_rx: Receiver<ViewEvent>,
    pub evt_tx: Sender<ViewEvent>, // shareable for view backends
}

impl Bus {
    /// Builds the channel pair; the command receiver goes to the browser view.
    pub fn new() -> (Self, Receiver<ViewCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (evt_tx, evt_rx) = mpsc::channel();
        (
            Self {
                cmd_tx,
                evt_rx,
                evt_tx,
            },
            cmd_rx,
        )
    }

    /// Drains every pending event, in dispatch order.
    pub fn drain_events(&self) -> Vec<ViewEvent> {
        self.evt_rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_drain_in_send_order() {
        let (bus, _cmd_rx) = Bus::new();
        let tx = bus.evt_tx.clone();
        tx.send(ViewEvent::LoadStart { url: "https://a/".into() }).unwrap();
        tx.send(ViewEvent::LoadEnd { url: "https://a/".into() }).unwrap();

        let events = bus.drain_events();
        assert_eq!(
            events,
            vec![
                ViewEvent::LoadStart { url: "https://a/".into() },
                ViewEvent::LoadEnd { url: "https://a/".into() },
            ]
        );
        assert!(bus.drain_events().is_empty());
    }

    #[test]
    fn commands_reach_the_view_side() {
        let (bus, cmd_rx) = Bus::new();
        let follow = ViewCommand::Follow { url: "https://a/b".into() };
        bus.cmd_tx.send(follow.clone()).unwrap();
        assert_eq!(cmd_rx.try_recv().unwrap(), follow);
    }
}
