//! Initial database migration.
//!
//! Creates the financial tables read by analytics, the document register and
//! the signature template tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: CLIENTS & PROJECTS
        // ============================================================
        db.execute_unprepared(CLIENTS_SQL).await?;
        db.execute_unprepared(PROJECTS_SQL).await?;

        // ============================================================
        // PART 2: MONEY IN / MONEY OUT
        // ============================================================
        db.execute_unprepared(PAYMENTS_SQL).await?;
        db.execute_unprepared(EXPENSES_SQL).await?;
        db.execute_unprepared(LEDGER_ENTRIES_SQL).await?;

        // ============================================================
        // PART 3: DOCUMENTS
        // ============================================================
        db.execute_unprepared(DOCUMENTS_SQL).await?;

        // ============================================================
        // PART 4: SIGNATURE TEMPLATES
        // ============================================================
        db.execute_unprepared(SIGNATURE_TEMPLATES_SQL).await?;
        db.execute_unprepared(DOCUMENT_SIGNATURES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const CLIENTS_SQL: &str = r"
CREATE TABLE clients (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255),
    phone VARCHAR(50),
    company VARCHAR(255),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_clients_name ON clients(name);
";

const PROJECTS_SQL: &str = r"
CREATE TABLE projects (
    id UUID PRIMARY KEY,
    client_id UUID NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
    service VARCHAR(255) NOT NULL,
    status VARCHAR(20) NOT NULL DEFAULT 'pending',
    assigned_staff VARCHAR(255),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_project_status CHECK (
        status IN ('pending', 'in-progress', 'completed', 'on-hold')
    )
);

CREATE INDEX idx_projects_client ON projects(client_id);
";

const PAYMENTS_SQL: &str = r"
CREATE TABLE payments (
    id UUID PRIMARY KEY,
    client_id UUID NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
    amount NUMERIC(15, 2) NOT NULL,
    payment_method VARCHAR(50) NOT NULL DEFAULT 'bank_transfer',
    payment_date DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_payment_amount CHECK (amount >= 0)
);

CREATE INDEX idx_payments_date ON payments(payment_date);
CREATE INDEX idx_payments_client ON payments(client_id);
";

const EXPENSES_SQL: &str = r"
CREATE TABLE expenses (
    id UUID PRIMARY KEY,
    category VARCHAR(100) NOT NULL,
    amount NUMERIC(15, 2) NOT NULL,
    expense_date DATE NOT NULL,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_expense_amount CHECK (amount >= 0)
);

CREATE INDEX idx_expenses_date ON expenses(expense_date);
";

const LEDGER_ENTRIES_SQL: &str = r"
CREATE TABLE ledger_entries (
    id UUID PRIMARY KEY,
    entry_type VARCHAR(20) NOT NULL,
    amount NUMERIC(15, 2) NOT NULL,
    entry_date DATE NOT NULL,
    linked_project_id UUID REFERENCES projects(id) ON DELETE SET NULL,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_ledger_entry_type CHECK (entry_type IN ('investment', 'credit', 'debit'))
);

CREATE INDEX idx_ledger_entries_date ON ledger_entries(entry_date);
CREATE INDEX idx_ledger_entries_type ON ledger_entries(entry_type, entry_date);
CREATE INDEX idx_ledger_entries_project ON ledger_entries(linked_project_id)
    WHERE linked_project_id IS NOT NULL;
";

const DOCUMENTS_SQL: &str = r"
CREATE TABLE documents (
    id UUID PRIMARY KEY,
    original_name VARCHAR(255) NOT NULL,
    file_name VARCHAR(255) NOT NULL,
    storage_key VARCHAR(500) NOT NULL UNIQUE,
    file_size BIGINT NOT NULL,
    file_type VARCHAR(20) NOT NULL,
    document_type VARCHAR(50) NOT NULL DEFAULT 'general',
    category VARCHAR(50) NOT NULL DEFAULT 'uncategorized',
    description TEXT NOT NULL DEFAULT '',
    tags TEXT NOT NULL DEFAULT '',
    project_id UUID REFERENCES projects(id) ON DELETE SET NULL,
    client_id UUID REFERENCES clients(id) ON DELETE SET NULL,
    uploaded_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ,

    CONSTRAINT chk_document_size CHECK (file_size > 0)
);

CREATE INDEX idx_documents_category ON documents(category);
CREATE INDEX idx_documents_created ON documents(created_at DESC);
CREATE INDEX idx_documents_client ON documents(client_id) WHERE client_id IS NOT NULL;
CREATE INDEX idx_documents_project ON documents(project_id) WHERE project_id IS NOT NULL;
";

const SIGNATURE_TEMPLATES_SQL: &str = r"
CREATE TABLE signature_templates (
    id UUID PRIMARY KEY,
    template_name VARCHAR(255) NOT NULL,
    template_type VARCHAR(50) NOT NULL DEFAULT 'basic',
    html_content TEXT NOT NULL,
    css_styles TEXT NOT NULL DEFAULT '',
    signature_fields JSONB NOT NULL DEFAULT '{}'::jsonb,
    default_values JSONB NOT NULL DEFAULT '{}'::jsonb,
    created_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ
);

CREATE INDEX idx_signature_templates_name ON signature_templates(template_name);
";

const DOCUMENT_SIGNATURES_SQL: &str = r"
CREATE TABLE document_signatures (
    id UUID PRIMARY KEY,
    template_id UUID NOT NULL REFERENCES signature_templates(id) ON DELETE CASCADE,
    document_id UUID REFERENCES documents(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_document_signatures_template ON document_signatures(template_id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS document_signatures CASCADE;
DROP TABLE IF EXISTS signature_templates CASCADE;
DROP TABLE IF EXISTS documents CASCADE;
DROP TABLE IF EXISTS ledger_entries CASCADE;
DROP TABLE IF EXISTS expenses CASCADE;
DROP TABLE IF EXISTS payments CASCADE;
DROP TABLE IF EXISTS projects CASCADE;
DROP TABLE IF EXISTS clients CASCADE;
";
