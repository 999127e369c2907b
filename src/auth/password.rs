//! bcrypt runs on the blocking pool so a slow hash never stalls a worker.

const COST: u32 = 10;

pub async fn hash(password: String) -> anyhow::Result<String> {
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, COST)).await??;
    Ok(hashed)
}

pub async fn verify(password: String, hash: String) -> anyhow::Result<bool> {
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(matches)
}
