/// GET / - Liveness probe
pub async fn liveness_handler() -> &'static str {
    "Cypher Tech is On..."
}
