//! Line-driven shell around the client core.
//!
//! Reads commands from stdin and prints the resulting state. A single local
//! connector (`injected`) stands in for a browser wallet.

use std::sync::Arc;
use std::time::Duration;

use async_channel::Sender;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

use dapp_client::core::service::Activator;
use dapp_client::debug::{self, DebugConfig};
use dapp_client::slippage::preset_label;
use dapp_client::wallet::{
    ConnectionError, Connector, ConnectorListener, ConnectorRegistry, ListenerId, ListenerTable,
    CONNECTOR_UPDATE_EVENT,
};
use dapp_client::{App, AppEvent, ClientConfig};
use shared::dto::{TransactionDetails, TransactionReceipt};

const LOCAL_CONNECTOR: &str = "injected";
const LOCAL_ACCOUNT: &str = "0x52908400098527886E0F7030069857D2E4169EE7";

struct LocalConnector {
    listeners: ListenerTable,
}

impl Connector for LocalConnector {
    fn id(&self) -> &str {
        LOCAL_CONNECTOR
    }

    fn add_listener(&self, event: &str, listener: ConnectorListener) -> ListenerId {
        self.listeners.add(event, listener)
    }

    fn remove_listener(&self, event: &str, id: ListenerId) -> bool {
        self.listeners.remove(event, id)
    }
}

/// Approves every activation and reports the fixed local account.
struct LocalActivator {
    events: Sender<AppEvent>,
}

#[async_trait]
impl Activator for LocalActivator {
    async fn activate(&self, connector: Arc<dyn Connector>) -> Result<(), ConnectionError> {
        let send = |event| {
            self.events
                .try_send(event)
                .map_err(|e| ConnectionError::Connector(e.to_string()))
        };
        send(AppEvent::ConnectorActivated(connector.id().to_string()))?;
        send(AppEvent::AccountChanged(Some(LOCAL_ACCOUNT.to_string())))
    }
}

const HELP: &str = "\
commands:
  slippage [text]      type into the custom slippage field
  preset <n>           pick preset n
  connect <id>         connect and remember the connector
  disconnect           forget account and connector
  update               fire a connector change event
  network on|off       toggle network reachability
  tx add <hash>        submit a transaction
  tx done <hash>       mark a transaction mined
  status               print current state
  quit";

#[tokio::main]
async fn main() -> dapp_client::Result<()> {
    let _guard = debug::init(&DebugConfig::from_env());
    tracing::info!("Starting dapp-client");

    let config = ClientConfig::load().inspect_err(|e| {
        debug::error_aggregator::global().record_error("config", e.to_string());
    })?;
    let connector = Arc::new(LocalConnector {
        listeners: ListenerTable::new(),
    });
    let registry = ConnectorRegistry::new().with(LOCAL_CONNECTOR, connector.clone());

    // The activator reports back through the app's own channel
    let (activator_tx, activator_rx) = async_channel::unbounded();
    let mut app = App::new(
        config,
        registry,
        Arc::new(LocalActivator { events: activator_tx }),
        debug::error_aggregator::global(),
    );
    let app_tx = app.sender();
    tokio::spawn(async move {
        while let Ok(event) = activator_rx.recv().await {
            if app_tx.send(event).await.is_err() {
                break;
            }
        }
    });

    app.startup();
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tick = tokio::time::interval(Duration::from_millis(100));

    loop {
        tokio::select! {
            _ = tick.tick() => {
                app.process_events();
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                app.process_events();
                if !run_command(&mut app, &connector, line.trim_end()) {
                    break;
                }
            }
        }
    }

    debug::error_aggregator::global().log_stats();
    tracing::info!("Shutting down");
    Ok(())
}

/// Returns false when the user asked to quit.
fn run_command(app: &mut App, connector: &LocalConnector, line: &str) -> bool {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    match command {
        "slippage" => {
            // Each line is a finished entry
            let outcome = app.slippage_input(rest);
            app.commit_slippage();
            println!("{:?}", outcome);
            print_slippage(app);
        }
        "preset" => match rest.trim().parse::<usize>().ok().and_then(|i| app.validator().presets().get(i).copied()) {
            Some(fraction) => {
                app.select_preset(fraction);
                print_slippage(app);
            }
            None => println!("unknown preset {:?}", rest),
        },
        "connect" => {
            if let Err(e) = app.connect_with(rest.trim()) {
                debug::error_aggregator::global().record_error("command:connect", e.to_string());
                println!("{}", e);
            }
        }
        "disconnect" => {
            if let Err(e) = app.disconnect() {
                debug::error_aggregator::global().record_error("command:disconnect", e.to_string());
                println!("{}", e);
            }
        }
        "update" => {
            let fired = connector.listeners.emit(CONNECTOR_UPDATE_EVENT);
            println!("{} listener(s) notified", fired);
        }
        "network" => {
            app.queue(AppEvent::NetworkChanged(rest.trim() != "off"));
        }
        "tx" => {
            let (action, hash) = rest.split_once(' ').unwrap_or((rest, ""));
            let event = match action {
                "add" => AppEvent::TransactionAdded(TransactionDetails::new(hash.trim(), LOCAL_ACCOUNT)),
                "done" => AppEvent::TransactionFinalized {
                    hash: hash.trim().to_string(),
                    receipt: TransactionReceipt::new(0, 1),
                },
                _ => {
                    println!("usage: tx add|done <hash>");
                    return true;
                }
            };
            app.queue(event);
        }
        "status" => print_status(app),
        "help" => println!("{HELP}"),
        "quit" | "exit" => return false,
        "" => {}
        other => println!("unknown command {:?}", other),
    }
    true
}

fn print_slippage(app: &App) {
    let input = app.slippage();
    println!("field: {:?}", input.raw());
    if let Some(error) = input.error() {
        println!("error: {}", error);
    }
    if let Some(warning) = input.warning() {
        println!("warning: {}", warning);
    }
    println!("tolerance: {}", app.state().slippage.get());
}

fn print_status(app: &App) {
    let presets: Vec<String> = app.validator().presets().iter().map(|f| preset_label(*f)).collect();
    let button = app.account_button();
    println!("account button: {}", button.label());
    println!("button state: {:?}", button);
    println!("reconnect: {:?}", app.reconnect_state());
    println!("saved connector: {:?}", app.state().saved_connector.get());
    println!("presets: {} (custom: {})", presets.join(" "), app.slippage().is_custom(app.validator()));
    println!("reloads: {}", app.reloads());
    print_slippage(app);
}
