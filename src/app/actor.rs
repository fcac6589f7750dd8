//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that owns the view state and is its only mutator
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Mount: list and monthly total go out together
        let commands = self.state.initial_load();
        self.dispatch(commands);
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if matches!(event, UiEvent::Quit) {
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let commands = self.state.apply(event);
                    self.dispatch(commands);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    let commands = self.state.handle_response(response);
                    self.dispatch(commands);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn dispatch(&self, commands: Vec<NetworkCommand>) {
        for cmd in commands {
            tracing::debug!(?cmd, "Dispatching network command");
            let _ = self.network_tx.send(cmd);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Period, Theme};

    #[tokio::test]
    async fn test_mount_fetches_list_and_total_then_quits() {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (_net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
        let (net_cmd_tx, mut net_cmd_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();

        let actor = AppActor::new(AppState::new(Period::new(2024, 1), Theme::Dark), net_cmd_tx, render_tx);
        let handle = tokio::spawn(actor.run(ui_rx, net_resp_rx));

        ui_tx.send(UiEvent::ToggleTheme).unwrap();
        ui_tx.send(UiEvent::Quit).unwrap();
        handle.await.unwrap();

        assert!(matches!(net_cmd_rx.recv().await, Some(NetworkCommand::FetchExpenses { .. })));
        assert!(matches!(
            net_cmd_rx.recv().await,
            Some(NetworkCommand::FetchMonthlyTotal { period, .. }) if period == Period::new(2024, 1)
        ));
        assert!(matches!(net_cmd_rx.recv().await, Some(NetworkCommand::Shutdown)));

        let first = render_rx.recv().await.unwrap();
        assert!(first.is_loading);
        assert_eq!(first.theme, Theme::Dark);
        let second = render_rx.recv().await.unwrap();
        assert_eq!(second.theme, Theme::Light);
    }
}
