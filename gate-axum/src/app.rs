use axum::Router;
use tokio::net::{TcpListener, ToSocketAddrs};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::middlewares::service_version_layer;
use crate::routes::gateway_router;
use crate::GateState;

/// The gateway's router plus the state behind it.
#[derive(Clone)]
pub struct GateApp {
    pub state: GateState,
    pub router: Router<()>,
}

impl GateApp {
    pub fn new(state: GateState, service_version: &str) -> Self {
        let router = gateway_router(state.clone())
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
            .layer(service_version_layer(service_version));

        Self { state, router }
    }

    pub async fn listen<A>(self, addr: A) -> anyhow::Result<()>
    where
        A: ToSocketAddrs,
    {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "mediagate listening");
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

pub fn gateway(state: GateState, service_version: &str) -> GateApp {
    GateApp::new(state, service_version)
}
