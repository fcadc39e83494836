use crate::core::store::{Store, StoreError, WriteOp};
use redis::{Commands, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 6379;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    Tcp { host: String, port: u16 },
    Unix(PathBuf),
}

impl Default for Address {
    fn default() -> Self {
        Address::Tcp {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Address::Tcp { host, port } => write!(f, "{}:{}", host, port),
            Address::Unix(path) => write!(f, "unix:{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionOptions {
    pub address: Address,
    pub password: Option<String>,
    pub db: i64,
}

impl ConnectionOptions {
    fn connection_info(&self) -> ConnectionInfo {
        let addr = match &self.address {
            Address::Tcp { host, port } => ConnectionAddr::Tcp(host.clone(), *port),
            Address::Unix(path) => ConnectionAddr::Unix(path.clone()),
        };
        ConnectionInfo {
            addr,
            redis: RedisConnectionInfo {
                db: self.db,
                password: self.password.clone(),
                ..Default::default()
            },
        }
    }
}

/// [`Store`] backed by a single synchronous Redis connection.
pub struct RedisStore {
    conn: redis::Connection,
}

impl RedisStore {
    pub fn connect(options: &ConnectionOptions) -> Result<Self, StoreError> {
        debug!(address = %options.address, db = options.db, "connecting");
        let client = redis::Client::open(options.connection_info())?;
        let conn = client.get_connection()?;
        Ok(Self { conn })
    }
}

impl Store for RedisStore {
    fn kind_of(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        let name: String = self.conn.key_type(key)?;
        if name == "none" {
            Ok(None)
        } else {
            Ok(Some(name))
        }
    }

    fn get_scalar(&mut self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.conn.get(key)?)
    }

    fn get_list(&mut self, key: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.conn.lrange(key, 0, -1)?)
    }

    fn get_set(&mut self, key: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.conn.smembers(key)?)
    }

    fn get_map(&mut self, key: &str) -> Result<Vec<(String, String)>, StoreError> {
        let fields: BTreeMap<String, String> = self.conn.hgetall(key)?;
        Ok(fields.into_iter().collect())
    }

    fn get_scored_set(&mut self, key: &str) -> Result<Vec<(String, f64)>, StoreError> {
        Ok(self.conn.zrange_withscores(key, 0, -1)?)
    }

    fn set_scalar(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let _: () = self.conn.set(key, value)?;
        Ok(())
    }

    fn apply_batch(&mut self, key: &str, ops: &[WriteOp]) -> Result<(), StoreError> {
        let pipe = build_pipeline(key, ops);
        debug!(key, ops = ops.len(), "executing pipeline");
        let _: () = pipe.query(&mut self.conn)?;
        Ok(())
    }
}

/// One `MULTI`/`EXEC` transaction applying `ops` to `key` in order. Recreate
/// steps with nothing to add are left out.
fn build_pipeline(key: &str, ops: &[WriteOp]) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic();
    for op in ops.iter().filter(|op| !op.is_empty_recreate()) {
        match op {
            WriteOp::Delete => {
                pipe.del(key).ignore();
            }
            WriteOp::PushList(items) => {
                pipe.rpush(key, items).ignore();
            }
            WriteOp::AddSetMembers(members) => {
                pipe.sadd(key, members).ignore();
            }
            WriteOp::SetMapFields(fields) => {
                pipe.hset_multiple(key, fields.as_slice()).ignore();
            }
            WriteOp::AddScoredMembers(members) => {
                // ZADD takes score before member.
                let scored: Vec<(f64, &str)> = members
                    .iter()
                    .map(|(member, score)| (*score, member.as_str()))
                    .collect();
                pipe.zadd_multiple(key, scored.as_slice()).ignore();
            }
        }
    }
    pipe
}
