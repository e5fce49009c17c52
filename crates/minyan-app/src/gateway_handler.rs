use std::sync::Arc;

use salvo::async_trait;

use minyan_core::config::MessagingConfig;
use minyan_service::notify::push::PushClient;
use minyan_service::notify::whatsapp::WhatsAppClient;

/// The configured outbound messaging clients; either may be disabled.
#[derive(Clone)]
pub struct Gateways {
    pub push: Option<PushClient>,
    pub whatsapp: Option<WhatsAppClient>,
}

impl Gateways {
    #[must_use]
    pub fn from_config(config: &MessagingConfig) -> Self {
        Self {
            push: PushClient::from_config(config),
            whatsapp: WhatsAppClient::from_config(config),
        }
    }
}

/// Injects the messaging clients into every request's depot.
pub struct GatewayHandler {
    pub gateways: Gateways,
}

#[async_trait]
impl salvo::Handler for GatewayHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        let gateways: Arc<Gateways> = Arc::new(self.gateways.clone());
        depot.inject(gateways);
    }
}

/// Retrieves the messaging clients from the depot; both channels read as
/// disabled if the handler wasn't installed.
#[must_use]
pub fn get_gateways_from_depot(depot: &salvo::Depot) -> Arc<Gateways> {
    depot
        .obtain::<Arc<Gateways>>()
        .cloned()
        .unwrap_or_else(|_err| {
            Arc::new(Gateways {
                push: None,
                whatsapp: None,
            })
        })
}
