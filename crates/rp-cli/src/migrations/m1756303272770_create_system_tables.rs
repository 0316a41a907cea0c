//! Account and permission tables.

use async_trait::async_trait;
use rp_db::Database;
use rp_migrate::{MigrateResult, Migration};

pub(crate) const VERSION: &str = "1756303272770";

const DDL: &str = r#"
CREATE TABLE IF NOT EXISTS sys_dept (
    id BIGINT PRIMARY KEY,
    parent_id BIGINT DEFAULT 0,
    dept_path VARCHAR(255),
    dept_name VARCHAR(128) NOT NULL,
    sort INTEGER DEFAULT 1,
    leader VARCHAR(128),
    phone VARCHAR(32),
    email VARCHAR(128),
    status VARCHAR(1) DEFAULT '0',
    created_at TIMESTAMP DEFAULT current_timestamp,
    updated_at TIMESTAMP DEFAULT current_timestamp
);

CREATE TABLE IF NOT EXISTS sys_post (
    id BIGINT PRIMARY KEY,
    post_code VARCHAR(64) NOT NULL UNIQUE,
    post_name VARCHAR(128) NOT NULL,
    sort INTEGER DEFAULT 1,
    status VARCHAR(1) DEFAULT '0',
    remark VARCHAR(255),
    created_at TIMESTAMP DEFAULT current_timestamp,
    updated_at TIMESTAMP DEFAULT current_timestamp
);

CREATE TABLE IF NOT EXISTS sys_role (
    id BIGINT PRIMARY KEY,
    name VARCHAR(128) NOT NULL UNIQUE,
    role_key VARCHAR(128) NOT NULL UNIQUE,
    status INTEGER DEFAULT 1,
    sort INTEGER DEFAULT 1,
    remark VARCHAR(255),
    admin BOOLEAN DEFAULT false,
    data_scope VARCHAR(128) DEFAULT '1',
    created_at TIMESTAMP DEFAULT current_timestamp,
    updated_at TIMESTAMP DEFAULT current_timestamp
);

CREATE TABLE IF NOT EXISTS sys_menu (
    id BIGINT PRIMARY KEY,
    name VARCHAR(128) NOT NULL,
    title VARCHAR(128),
    icon VARCHAR(128),
    path VARCHAR(128),
    component VARCHAR(128),
    permission VARCHAR(255),
    parent_id BIGINT DEFAULT 0,
    menu_type VARCHAR(1) DEFAULT 'M',
    sort INTEGER DEFAULT 1,
    visible VARCHAR(1) DEFAULT '0',
    status VARCHAR(1) DEFAULT '0',
    created_at TIMESTAMP DEFAULT current_timestamp,
    updated_at TIMESTAMP DEFAULT current_timestamp
);

CREATE TABLE IF NOT EXISTS sys_user (
    id BIGINT PRIMARY KEY,
    username VARCHAR(64) NOT NULL UNIQUE,
    password VARCHAR(128) NOT NULL,
    nick_name VARCHAR(128),
    email VARCHAR(128),
    phone VARCHAR(32),
    status INTEGER DEFAULT 1,
    is_admin BOOLEAN DEFAULT false,
    remark VARCHAR(255),
    dept_id BIGINT DEFAULT 0,
    post_id BIGINT DEFAULT 0,
    role_id BIGINT DEFAULT 0,
    last_login_ip VARCHAR(128),
    created_at TIMESTAMP DEFAULT current_timestamp,
    updated_at TIMESTAMP DEFAULT current_timestamp
);

CREATE TABLE IF NOT EXISTS sys_role_menu (
    role_id BIGINT NOT NULL,
    menu_id BIGINT NOT NULL,
    PRIMARY KEY (role_id, menu_id)
);
"#;

pub(crate) struct CreateSystemTables;

#[async_trait]
impl Migration for CreateSystemTables {
    fn name(&self) -> &str {
        "create system tables"
    }

    async fn up(&self, db: &dyn Database, _version: &str) -> MigrateResult<()> {
        db.execute_batch(DDL).await?;
        Ok(())
    }
}
