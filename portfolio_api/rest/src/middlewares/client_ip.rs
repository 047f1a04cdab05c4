use std::{
    fmt,
    net::{IpAddr, SocketAddr},
};

use axum::{
    extract::{ConnectInfo, Request},
    middleware::{from_fn, Next},
    Router,
};

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(from_fn(|mut request: Request, next: Next| {
        let client_ip = ClientIp::from_request(&request);
        request.extensions_mut().insert(client_ip);
        next.run(request)
    }))
}

/// Address of the peer which sent the request. Unknown if the server was not
/// started with connection info, e.g. when the router is driven in-process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientIp(pub Option<IpAddr>);

impl ClientIp {
    fn from_request(request: &Request) -> Self {
        Self(
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip()),
        )
    }
}

impl fmt::Display for ClientIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(ip) => ip.fmt(f),
            None => f.write_str("unknown"),
        }
    }
}
