//! Agents, houses, tenants and rental records.

use async_trait::async_trait;
use rp_db::Database;
use rp_migrate::{MigrateResult, Migration};

pub(crate) const VERSION: &str = "1756303600000";

/// Referenced tables first: houses point at buildings and agents, rental
/// records at tenants, houses and agents. References are kept by id only.
const DDL: &str = r#"
CREATE TABLE IF NOT EXISTS sys_agent (
    id BIGINT PRIMARY KEY,
    agent_code VARCHAR(50) NOT NULL UNIQUE,
    name VARCHAR(50) NOT NULL,
    gender VARCHAR(10),
    birthday DATE,
    id_card VARCHAR(18),
    phone VARCHAR(20) NOT NULL,
    email VARCHAR(100),
    address VARCHAR(300),
    avatar VARCHAR(500),
    job_title VARCHAR(50) NOT NULL,
    department VARCHAR(100),
    hire_date DATE,
    work_years INTEGER DEFAULT 0,
    license_no VARCHAR(100),
    service_area VARCHAR(200),
    specialization VARCHAR(200),
    commission DECIMAL(5,2) DEFAULT 3.00,
    total_deals INTEGER DEFAULT 0,
    monthly_deals INTEGER DEFAULT 0,
    total_revenue DECIMAL(12,2) DEFAULT 0,
    monthly_revenue DECIMAL(12,2) DEFAULT 0,
    rating DECIMAL(3,2) DEFAULT 5.00,
    review_count INTEGER DEFAULT 0,
    status VARCHAR(20) NOT NULL DEFAULT 'active',
    is_top_agent BOOLEAN DEFAULT false,
    is_online BOOLEAN DEFAULT false,
    last_login_at TIMESTAMP,
    introduction TEXT,
    achievements TEXT,
    created_by VARCHAR(50),
    updated_by VARCHAR(50),
    created_at TIMESTAMP DEFAULT current_timestamp,
    updated_at TIMESTAMP DEFAULT current_timestamp,
    deleted_at TIMESTAMP
);

CREATE TABLE IF NOT EXISTS sys_house (
    id BIGINT PRIMARY KEY,
    building_id BIGINT NOT NULL,
    agent_id BIGINT,
    house_code VARCHAR(50) NOT NULL UNIQUE,
    floor INTEGER NOT NULL,
    unit VARCHAR(20),
    room VARCHAR(20) NOT NULL,
    full_address VARCHAR(500) NOT NULL,
    house_type VARCHAR(50) NOT NULL,
    area DECIMAL(8,2) NOT NULL,
    usable_area DECIMAL(8,2),
    orientation VARCHAR(50),
    decoration VARCHAR(50),
    rent_price INTEGER NOT NULL,
    service_fee INTEGER DEFAULT 0,
    deposit INTEGER NOT NULL,
    payment_cycle VARCHAR(20) DEFAULT '月付',
    has_elevator BOOLEAN DEFAULT false,
    has_parking BOOLEAN DEFAULT false,
    has_balcony BOOLEAN DEFAULT false,
    has_aircon BOOLEAN DEFAULT false,
    has_wifi BOOLEAN DEFAULT false,
    has_washer BOOLEAN DEFAULT false,
    has_refrigerator BOOLEAN DEFAULT false,
    rental_status VARCHAR(20) NOT NULL DEFAULT 'available',
    is_recommended BOOLEAN DEFAULT false,
    view_count INTEGER DEFAULT 0,
    title VARCHAR(200) NOT NULL,
    description TEXT,
    images TEXT,
    tags VARCHAR(500),
    created_by VARCHAR(50),
    updated_by VARCHAR(50),
    created_at TIMESTAMP DEFAULT current_timestamp,
    updated_at TIMESTAMP DEFAULT current_timestamp,
    deleted_at TIMESTAMP
);

CREATE TABLE IF NOT EXISTS sys_tenant (
    id BIGINT PRIMARY KEY,
    tenant_code VARCHAR(50) NOT NULL UNIQUE,
    name VARCHAR(50) NOT NULL,
    gender VARCHAR(10),
    birthday DATE,
    id_card VARCHAR(18),
    phone VARCHAR(20) NOT NULL,
    email VARCHAR(100),
    wechat_id VARCHAR(100),
    emergency_contact VARCHAR(50),
    emergency_phone VARCHAR(20),
    avatar VARCHAR(500),
    occupation VARCHAR(100),
    company VARCHAR(200),
    work_address VARCHAR(300),
    monthly_income INTEGER,
    preferred_area VARCHAR(200),
    preferred_house_type VARCHAR(100),
    min_rent INTEGER DEFAULT 0,
    max_rent INTEGER DEFAULT 0,
    min_area DECIMAL(8,2) DEFAULT 0,
    max_area DECIMAL(8,2) DEFAULT 0,
    preferred_floor VARCHAR(50),
    required_facilities TEXT,
    rental_count INTEGER DEFAULT 0,
    total_rent_paid DECIMAL(12,2) DEFAULT 0,
    average_rent_days INTEGER DEFAULT 0,
    credit_score INTEGER DEFAULT 100,
    tenant_status VARCHAR(20) NOT NULL DEFAULT 'active',
    is_vip BOOLEAN DEFAULT false,
    register_source VARCHAR(50),
    last_active_at TIMESTAMP,
    personal_note TEXT,
    special_needs TEXT,
    created_by VARCHAR(50),
    updated_by VARCHAR(50),
    created_at TIMESTAMP DEFAULT current_timestamp,
    updated_at TIMESTAMP DEFAULT current_timestamp,
    deleted_at TIMESTAMP
);

CREATE TABLE IF NOT EXISTS sys_rental_record (
    id BIGINT PRIMARY KEY,
    tenant_id BIGINT NOT NULL,
    house_id BIGINT NOT NULL,
    agent_id BIGINT,
    contract_code VARCHAR(100) NOT NULL UNIQUE,
    contract_type VARCHAR(20) NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    actual_end_date DATE,
    rental_days INTEGER NOT NULL,
    monthly_rent INTEGER NOT NULL,
    deposit INTEGER NOT NULL,
    service_fee INTEGER DEFAULT 0,
    commission DECIMAL(10,2) DEFAULT 0,
    total_amount INTEGER NOT NULL,
    payment_cycle VARCHAR(20) NOT NULL,
    payment_method VARCHAR(50),
    rental_status VARCHAR(20) NOT NULL DEFAULT 'active',
    payment_status VARCHAR(20) NOT NULL DEFAULT 'current',
    tenant_rating DECIMAL(3,2) DEFAULT 0,
    house_rating DECIMAL(3,2) DEFAULT 0,
    agent_rating DECIMAL(3,2) DEFAULT 0,
    tenant_review TEXT,
    landlord_review TEXT,
    check_out_date DATE,
    deposit_refund INTEGER DEFAULT 0,
    deduction_amount INTEGER DEFAULT 0,
    deduction_reason TEXT,
    contract_note TEXT,
    special_terms TEXT,
    created_by VARCHAR(50),
    updated_by VARCHAR(50),
    created_at TIMESTAMP DEFAULT current_timestamp,
    updated_at TIMESTAMP DEFAULT current_timestamp,
    deleted_at TIMESTAMP
);
"#;

pub(crate) struct CreateRentalBusinessTables;

#[async_trait]
impl Migration for CreateRentalBusinessTables {
    fn name(&self) -> &str {
        "create rental business tables (agent, house, tenant, rental record)"
    }

    async fn up(&self, db: &dyn Database, _version: &str) -> MigrateResult<()> {
        db.execute_batch(DDL).await?;
        Ok(())
    }
}
