//! `SeaORM` Entity for signature_templates table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "signature_templates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub template_name: String,
    pub template_type: String,
    #[sea_orm(column_type = "Text")]
    pub html_content: String,
    #[sea_orm(column_type = "Text")]
    pub css_styles: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub signature_fields: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub default_values: Json,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::document_signatures::Entity")]
    DocumentSignatures,
}

impl Related<super::document_signatures::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentSignatures.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
