//! Column layouts of the system views, as MySQL 8.0 documents them.

use crate::constructs::components::{ColumnDefinition, DataType, DataTypeRaw, Schema};
use DataTypeRaw::*;

const NULL: bool = true;
const NOT_NULL: bool = false;

/// Identifier columns: schema, table, column and constraint names.
const NAME: DataTypeRaw = VarChar(64);
const YES_NO: DataTypeRaw = VarChar(3);
const DEFINER: DataTypeRaw = VarChar(288);
const GRANTEE: DataTypeRaw = VarChar(292);

fn build(columns: &[(&str, DataTypeRaw, bool)]) -> Schema {
    columns
        .iter()
        .map(|(name, raw_type, is_nullable)| {
            ColumnDefinition::new(
                name,
                DataType {
                    raw_type: *raw_type,
                    is_nullable: *is_nullable,
                },
            )
        })
        .collect()
}

pub fn tables() -> Schema {
    build(&[
        ("TABLE_CATALOG", NAME, NOT_NULL),
        ("TABLE_SCHEMA", NAME, NOT_NULL),
        ("TABLE_NAME", NAME, NOT_NULL),
        ("TABLE_TYPE", VarChar(11), NOT_NULL),
        ("ENGINE", NAME, NULL),
        ("VERSION", Int32, NULL),
        ("ROW_FORMAT", VarChar(10), NULL),
        ("TABLE_ROWS", UInt64, NULL),
        ("AVG_ROW_LENGTH", UInt64, NULL),
        ("DATA_LENGTH", UInt64, NULL),
        ("MAX_DATA_LENGTH", UInt64, NULL),
        ("INDEX_LENGTH", UInt64, NULL),
        ("DATA_FREE", UInt64, NULL),
        ("AUTO_INCREMENT", UInt64, NULL),
        ("CREATE_TIME", Timestamp, NOT_NULL),
        ("UPDATE_TIME", DateTime, NULL),
        ("CHECK_TIME", DateTime, NULL),
        ("TABLE_COLLATION", NAME, NULL),
        ("CHECKSUM", Int64, NULL),
        ("CREATE_OPTIONS", VarChar(256), NULL),
        ("TABLE_COMMENT", Text, NULL),
    ])
}

pub fn columns() -> Schema {
    build(&[
        ("TABLE_CATALOG", NAME, NOT_NULL),
        ("TABLE_SCHEMA", NAME, NOT_NULL),
        ("TABLE_NAME", NAME, NOT_NULL),
        ("COLUMN_NAME", NAME, NULL),
        ("ORDINAL_POSITION", UInt32, NOT_NULL),
        ("COLUMN_DEFAULT", Text, NULL),
        ("IS_NULLABLE", YES_NO, NOT_NULL),
        ("DATA_TYPE", Text, NULL),
        ("CHARACTER_MAXIMUM_LENGTH", Int64, NULL),
        ("CHARACTER_OCTET_LENGTH", Int64, NULL),
        ("NUMERIC_PRECISION", UInt64, NULL),
        ("NUMERIC_SCALE", UInt64, NULL),
        ("DATETIME_PRECISION", UInt32, NULL),
        ("CHARACTER_SET_NAME", NAME, NULL),
        ("COLLATION_NAME", NAME, NULL),
        ("COLUMN_TYPE", Text, NOT_NULL),
        ("COLUMN_KEY", YES_NO, NOT_NULL),
        ("EXTRA", VarChar(256), NULL),
        ("PRIVILEGES", VarChar(154), NULL),
        ("COLUMN_COMMENT", Text, NOT_NULL),
        ("GENERATION_EXPRESSION", Text, NOT_NULL),
        ("SRS_ID", UInt32, NULL),
    ])
}

pub fn schemata() -> Schema {
    build(&[
        ("CATALOG_NAME", NAME, NOT_NULL),
        ("SCHEMA_NAME", NAME, NOT_NULL),
        ("DEFAULT_CHARACTER_SET_NAME", NAME, NOT_NULL),
        ("DEFAULT_COLLATION_NAME", NAME, NOT_NULL),
        ("SQL_PATH", Blob, NULL),
        ("DEFAULT_ENCRYPTION", YES_NO, NOT_NULL),
    ])
}

pub fn collations() -> Schema {
    build(&[
        ("COLLATION_NAME", NAME, NOT_NULL),
        ("CHARACTER_SET_NAME", NAME, NOT_NULL),
        ("ID", UInt64, NOT_NULL),
        ("IS_DEFAULT", YES_NO, NOT_NULL),
        ("IS_COMPILED", YES_NO, NOT_NULL),
        ("SORTLEN", UInt32, NOT_NULL),
        ("PAD_ATTRIBUTE", VarChar(9), NOT_NULL),
    ])
}

pub fn character_sets() -> Schema {
    build(&[
        ("CHARACTER_SET_NAME", NAME, NOT_NULL),
        ("DEFAULT_COLLATE_NAME", NAME, NOT_NULL),
        ("DESCRIPTION", VarChar(2048), NOT_NULL),
        ("MAXLEN", UInt32, NOT_NULL),
    ])
}

pub fn engines() -> Schema {
    build(&[
        ("ENGINE", NAME, NOT_NULL),
        ("SUPPORT", VarChar(8), NOT_NULL),
        ("COMMENT", VarChar(80), NOT_NULL),
        ("TRANSACTIONS", YES_NO, NULL),
        ("XA", YES_NO, NULL),
        ("SAVEPOINTS", YES_NO, NULL),
    ])
}

/// Index layout, one row per indexed column.
pub fn statistics() -> Schema {
    build(&[
        ("TABLE_CATALOG", NAME, NOT_NULL),
        ("TABLE_SCHEMA", NAME, NOT_NULL),
        ("TABLE_NAME", NAME, NOT_NULL),
        ("NON_UNIQUE", Int32, NOT_NULL),
        ("INDEX_SCHEMA", NAME, NOT_NULL),
        ("INDEX_NAME", NAME, NULL),
        ("SEQ_IN_INDEX", UInt32, NOT_NULL),
        ("COLUMN_NAME", NAME, NULL),
        ("COLLATION", VarChar(1), NULL),
        ("CARDINALITY", Int64, NULL),
        ("SUB_PART", Int64, NULL),
        ("PACKED", Blob, NULL),
        ("NULLABLE", YES_NO, NOT_NULL),
        ("INDEX_TYPE", VarChar(11), NOT_NULL),
        ("COMMENT", VarChar(8), NOT_NULL),
        ("INDEX_COMMENT", VarChar(2048), NOT_NULL),
        ("IS_VISIBLE", YES_NO, NOT_NULL),
        ("EXPRESSION", Text, NULL),
    ])
}

pub fn column_statistics() -> Schema {
    build(&[
        ("SCHEMA_NAME", NAME, NOT_NULL),
        ("TABLE_NAME", NAME, NOT_NULL),
        ("COLUMN_NAME", NAME, NOT_NULL),
        ("HISTOGRAM", Json, NOT_NULL),
    ])
}

pub fn table_constraints() -> Schema {
    build(&[
        ("CONSTRAINT_CATALOG", NAME, NOT_NULL),
        ("CONSTRAINT_SCHEMA", NAME, NOT_NULL),
        ("CONSTRAINT_NAME", NAME, NULL),
        ("TABLE_SCHEMA", NAME, NOT_NULL),
        ("TABLE_NAME", NAME, NOT_NULL),
        ("CONSTRAINT_TYPE", VarChar(11), NOT_NULL),
        ("ENFORCED", YES_NO, NOT_NULL),
    ])
}

pub fn referential_constraints() -> Schema {
    build(&[
        ("CONSTRAINT_CATALOG", NAME, NOT_NULL),
        ("CONSTRAINT_SCHEMA", NAME, NOT_NULL),
        ("CONSTRAINT_NAME", NAME, NULL),
        ("UNIQUE_CONSTRAINT_CATALOG", NAME, NOT_NULL),
        ("UNIQUE_CONSTRAINT_SCHEMA", NAME, NOT_NULL),
        ("UNIQUE_CONSTRAINT_NAME", NAME, NULL),
        ("MATCH_OPTION", VarChar(7), NOT_NULL),
        ("UPDATE_RULE", VarChar(11), NOT_NULL),
        ("DELETE_RULE", VarChar(11), NOT_NULL),
        ("TABLE_NAME", NAME, NOT_NULL),
        ("REFERENCED_TABLE_NAME", NAME, NOT_NULL),
    ])
}

pub fn key_column_usage() -> Schema {
    build(&[
        ("CONSTRAINT_CATALOG", NAME, NOT_NULL),
        ("CONSTRAINT_SCHEMA", NAME, NOT_NULL),
        ("CONSTRAINT_NAME", NAME, NULL),
        ("TABLE_CATALOG", NAME, NOT_NULL),
        ("TABLE_SCHEMA", NAME, NOT_NULL),
        ("TABLE_NAME", NAME, NOT_NULL),
        ("COLUMN_NAME", NAME, NULL),
        ("ORDINAL_POSITION", UInt32, NOT_NULL),
        ("POSITION_IN_UNIQUE_CONSTRAINT", UInt32, NULL),
        ("REFERENCED_TABLE_SCHEMA", NAME, NULL),
        ("REFERENCED_TABLE_NAME", NAME, NULL),
        ("REFERENCED_COLUMN_NAME", NAME, NULL),
    ])
}

pub fn check_constraints() -> Schema {
    build(&[
        ("CONSTRAINT_CATALOG", NAME, NOT_NULL),
        ("CONSTRAINT_SCHEMA", NAME, NOT_NULL),
        ("CONSTRAINT_NAME", NAME, NOT_NULL),
        ("CHECK_CLAUSE", Text, NOT_NULL),
    ])
}

pub fn triggers() -> Schema {
    build(&[
        ("TRIGGER_CATALOG", NAME, NOT_NULL),
        ("TRIGGER_SCHEMA", NAME, NOT_NULL),
        ("TRIGGER_NAME", NAME, NOT_NULL),
        ("EVENT_MANIPULATION", VarChar(6), NOT_NULL),
        ("EVENT_OBJECT_CATALOG", NAME, NOT_NULL),
        ("EVENT_OBJECT_SCHEMA", NAME, NOT_NULL),
        ("EVENT_OBJECT_TABLE", NAME, NOT_NULL),
        ("ACTION_ORDER", UInt32, NOT_NULL),
        ("ACTION_CONDITION", Blob, NULL),
        ("ACTION_STATEMENT", Text, NOT_NULL),
        ("ACTION_ORIENTATION", VarChar(3), NOT_NULL),
        ("ACTION_TIMING", VarChar(6), NOT_NULL),
        ("ACTION_REFERENCE_OLD_TABLE", Blob, NULL),
        ("ACTION_REFERENCE_NEW_TABLE", Blob, NULL),
        ("ACTION_REFERENCE_OLD_ROW", YES_NO, NOT_NULL),
        ("ACTION_REFERENCE_NEW_ROW", YES_NO, NOT_NULL),
        ("CREATED", Timestamp, NOT_NULL),
        ("SQL_MODE", Text, NOT_NULL),
        ("DEFINER", DEFINER, NOT_NULL),
        ("CHARACTER_SET_CLIENT", NAME, NOT_NULL),
        ("COLLATION_CONNECTION", NAME, NOT_NULL),
        ("DATABASE_COLLATION", NAME, NOT_NULL),
    ])
}

pub fn routines() -> Schema {
    build(&[
        ("SPECIFIC_NAME", NAME, NOT_NULL),
        ("ROUTINE_CATALOG", NAME, NOT_NULL),
        ("ROUTINE_SCHEMA", NAME, NOT_NULL),
        ("ROUTINE_NAME", NAME, NOT_NULL),
        ("ROUTINE_TYPE", VarChar(9), NOT_NULL),
        ("DATA_TYPE", Text, NULL),
        ("CHARACTER_MAXIMUM_LENGTH", Int64, NULL),
        ("CHARACTER_OCTET_LENGTH", Int64, NULL),
        ("NUMERIC_PRECISION", UInt32, NULL),
        ("NUMERIC_SCALE", UInt32, NULL),
        ("DATETIME_PRECISION", UInt32, NULL),
        ("CHARACTER_SET_NAME", NAME, NULL),
        ("COLLATION_NAME", NAME, NULL),
        ("DTD_IDENTIFIER", Text, NULL),
        ("ROUTINE_BODY", VarChar(8), NOT_NULL),
        ("ROUTINE_DEFINITION", Text, NULL),
        ("EXTERNAL_NAME", Blob, NULL),
        ("EXTERNAL_LANGUAGE", NAME, NOT_NULL),
        ("PARAMETER_STYLE", VarChar(3), NOT_NULL),
        ("IS_DETERMINISTIC", YES_NO, NOT_NULL),
        ("SQL_DATA_ACCESS", VarChar(17), NOT_NULL),
        ("SQL_PATH", Blob, NULL),
        ("SECURITY_TYPE", VarChar(7), NOT_NULL),
        ("CREATED", Timestamp, NOT_NULL),
        ("LAST_ALTERED", Timestamp, NOT_NULL),
        ("SQL_MODE", Text, NOT_NULL),
        ("ROUTINE_COMMENT", Text, NOT_NULL),
        ("DEFINER", DEFINER, NOT_NULL),
        ("CHARACTER_SET_CLIENT", NAME, NOT_NULL),
        ("COLLATION_CONNECTION", NAME, NOT_NULL),
        ("DATABASE_COLLATION", NAME, NOT_NULL),
    ])
}

pub fn views() -> Schema {
    build(&[
        ("TABLE_CATALOG", NAME, NOT_NULL),
        ("TABLE_SCHEMA", NAME, NOT_NULL),
        ("TABLE_NAME", NAME, NOT_NULL),
        ("VIEW_DEFINITION", Text, NULL),
        ("CHECK_OPTION", VarChar(8), NULL),
        ("IS_UPDATABLE", YES_NO, NULL),
        ("DEFINER", DEFINER, NULL),
        ("SECURITY_TYPE", VarChar(7), NULL),
        ("CHARACTER_SET_CLIENT", NAME, NOT_NULL),
        ("COLLATION_CONNECTION", NAME, NOT_NULL),
    ])
}

pub fn user_privileges() -> Schema {
    build(&[
        ("GRANTEE", GRANTEE, NOT_NULL),
        ("TABLE_CATALOG", VarChar(512), NOT_NULL),
        ("PRIVILEGE_TYPE", NAME, NOT_NULL),
        ("IS_GRANTABLE", YES_NO, NOT_NULL),
    ])
}

pub fn schema_privileges() -> Schema {
    build(&[
        ("GRANTEE", GRANTEE, NOT_NULL),
        ("TABLE_CATALOG", VarChar(512), NOT_NULL),
        ("TABLE_SCHEMA", NAME, NOT_NULL),
        ("PRIVILEGE_TYPE", NAME, NOT_NULL),
        ("IS_GRANTABLE", YES_NO, NOT_NULL),
    ])
}

pub fn table_privileges() -> Schema {
    build(&[
        ("GRANTEE", GRANTEE, NOT_NULL),
        ("TABLE_CATALOG", VarChar(512), NOT_NULL),
        ("TABLE_SCHEMA", NAME, NOT_NULL),
        ("TABLE_NAME", NAME, NOT_NULL),
        ("PRIVILEGE_TYPE", NAME, NOT_NULL),
        ("IS_GRANTABLE", YES_NO, NOT_NULL),
    ])
}

pub fn column_privileges() -> Schema {
    build(&[
        ("GRANTEE", GRANTEE, NOT_NULL),
        ("TABLE_CATALOG", VarChar(512), NOT_NULL),
        ("TABLE_SCHEMA", NAME, NOT_NULL),
        ("TABLE_NAME", NAME, NOT_NULL),
        ("COLUMN_NAME", NAME, NOT_NULL),
        ("PRIVILEGE_TYPE", NAME, NOT_NULL),
        ("IS_GRANTABLE", YES_NO, NOT_NULL),
    ])
}

pub fn events() -> Schema {
    build(&[
        ("EVENT_CATALOG", NAME, NOT_NULL),
        ("EVENT_SCHEMA", NAME, NOT_NULL),
        ("EVENT_NAME", NAME, NOT_NULL),
        ("DEFINER", DEFINER, NOT_NULL),
        ("TIME_ZONE", NAME, NOT_NULL),
        ("EVENT_BODY", VarChar(3), NOT_NULL),
        ("EVENT_DEFINITION", Text, NOT_NULL),
        ("EVENT_TYPE", VarChar(9), NOT_NULL),
        ("EXECUTE_AT", DateTime, NULL),
        ("INTERVAL_VALUE", VarChar(256), NULL),
        ("INTERVAL_FIELD", VarChar(18), NULL),
        ("SQL_MODE", Text, NOT_NULL),
        ("STARTS", DateTime, NULL),
        ("ENDS", DateTime, NULL),
        ("STATUS", VarChar(18), NOT_NULL),
        ("ON_COMPLETION", VarChar(12), NOT_NULL),
        ("CREATED", Timestamp, NOT_NULL),
        ("LAST_ALTERED", Timestamp, NOT_NULL),
        ("LAST_EXECUTED", DateTime, NULL),
        ("EVENT_COMMENT", VarChar(2048), NOT_NULL),
        ("ORIGINATOR", UInt32, NOT_NULL),
        ("CHARACTER_SET_CLIENT", NAME, NOT_NULL),
        ("COLLATION_CONNECTION", NAME, NOT_NULL),
        ("DATABASE_COLLATION", NAME, NOT_NULL),
    ])
}

pub fn partitions() -> Schema {
    build(&[
        ("TABLE_CATALOG", NAME, NOT_NULL),
        ("TABLE_SCHEMA", NAME, NOT_NULL),
        ("TABLE_NAME", NAME, NOT_NULL),
        ("PARTITION_NAME", NAME, NULL),
        ("SUBPARTITION_NAME", NAME, NULL),
        ("PARTITION_ORDINAL_POSITION", UInt32, NULL),
        ("SUBPARTITION_ORDINAL_POSITION", UInt32, NULL),
        ("PARTITION_METHOD", VarChar(13), NULL),
        ("SUBPARTITION_METHOD", VarChar(13), NULL),
        ("PARTITION_EXPRESSION", VarChar(2048), NULL),
        ("SUBPARTITION_EXPRESSION", VarChar(2048), NULL),
        ("PARTITION_DESCRIPTION", Text, NULL),
        ("TABLE_ROWS", UInt64, NULL),
        ("AVG_ROW_LENGTH", UInt64, NULL),
        ("DATA_LENGTH", UInt64, NULL),
        ("MAX_DATA_LENGTH", UInt64, NULL),
        ("INDEX_LENGTH", UInt64, NULL),
        ("DATA_FREE", UInt64, NULL),
        ("CREATE_TIME", Timestamp, NOT_NULL),
        ("UPDATE_TIME", DateTime, NULL),
        ("CHECK_TIME", DateTime, NULL),
        ("CHECKSUM", Int64, NULL),
        ("PARTITION_COMMENT", Text, NOT_NULL),
        ("NODEGROUP", VarChar(256), NULL),
        ("TABLESPACE_NAME", VarChar(268), NULL),
    ])
}

pub fn files() -> Schema {
    build(&[
        ("FILE_ID", Int64, NULL),
        ("FILE_NAME", Text, NULL),
        ("FILE_TYPE", VarChar(256), NULL),
        ("TABLESPACE_NAME", VarChar(268), NOT_NULL),
        ("TABLE_CATALOG", Char(0), NOT_NULL),
        ("TABLE_SCHEMA", Blob, NULL),
        ("TABLE_NAME", Blob, NULL),
        ("LOGFILE_GROUP_NAME", VarChar(256), NULL),
        ("LOGFILE_GROUP_NUMBER", Int64, NULL),
        ("ENGINE", NAME, NOT_NULL),
        ("FULLTEXT_KEYS", Blob, NULL),
        ("DELETED_ROWS", Blob, NULL),
        ("UPDATE_COUNT", Blob, NULL),
        ("FREE_EXTENTS", Int64, NULL),
        ("TOTAL_EXTENTS", Int64, NULL),
        ("EXTENT_SIZE", Int64, NULL),
        ("INITIAL_SIZE", Int64, NULL),
        ("MAXIMUM_SIZE", Int64, NULL),
        ("AUTOEXTEND_SIZE", Int64, NULL),
        ("CREATION_TIME", Blob, NULL),
        ("LAST_UPDATE_TIME", Blob, NULL),
        ("LAST_ACCESS_TIME", Blob, NULL),
        ("RECOVER_TIME", Blob, NULL),
        ("TRANSACTION_COUNTER", Blob, NULL),
        ("VERSION", Int64, NULL),
        ("ROW_FORMAT", VarChar(256), NULL),
        ("TABLE_ROWS", Blob, NULL),
        ("AVG_ROW_LENGTH", Blob, NULL),
        ("DATA_LENGTH", Blob, NULL),
        ("MAX_DATA_LENGTH", Blob, NULL),
        ("INDEX_LENGTH", Blob, NULL),
        ("DATA_FREE", Int64, NULL),
        ("CREATE_TIME", Blob, NULL),
        ("UPDATE_TIME", Blob, NULL),
        ("CHECK_TIME", Blob, NULL),
        ("CHECKSUM", Blob, NULL),
        ("STATUS", VarChar(256), NULL),
        ("EXTRA", VarChar(256), NULL),
    ])
}

pub fn plugins() -> Schema {
    build(&[
        ("PLUGIN_NAME", NAME, NOT_NULL),
        ("PLUGIN_VERSION", VarChar(20), NOT_NULL),
        ("PLUGIN_STATUS", VarChar(10), NOT_NULL),
        ("PLUGIN_TYPE", VarChar(80), NOT_NULL),
        ("PLUGIN_TYPE_VERSION", VarChar(20), NOT_NULL),
        ("PLUGIN_LIBRARY", NAME, NULL),
        ("PLUGIN_LIBRARY_VERSION", VarChar(20), NULL),
        ("PLUGIN_AUTHOR", Text, NULL),
        ("PLUGIN_DESCRIPTION", Text, NULL),
        ("PLUGIN_LICENSE", VarChar(80), NULL),
        ("LOAD_OPTION", VarChar(64), NOT_NULL),
    ])
}

pub fn processlist() -> Schema {
    build(&[
        ("ID", UInt64, NOT_NULL),
        ("USER", VarChar(32), NOT_NULL),
        ("HOST", VarChar(261), NOT_NULL),
        ("DB", NAME, NULL),
        ("COMMAND", VarChar(16), NOT_NULL),
        ("TIME", Int32, NOT_NULL),
        ("STATE", NAME, NULL),
        ("INFO", Text, NULL),
    ])
}

pub fn resource_groups() -> Schema {
    build(&[
        ("RESOURCE_GROUP_NAME", NAME, NOT_NULL),
        ("RESOURCE_GROUP_TYPE", VarChar(6), NOT_NULL),
        ("RESOURCE_GROUP_ENABLED", Int8, NOT_NULL),
        ("VCPU_IDS", Blob, NULL),
        ("THREAD_PRIORITY", Int32, NOT_NULL),
    ])
}

pub fn keywords() -> Schema {
    build(&[("WORD", VarChar(128), NULL), ("RESERVED", Int32, NULL)])
}

pub fn parameters() -> Schema {
    build(&[
        ("SPECIFIC_CATALOG", NAME, NOT_NULL),
        ("SPECIFIC_SCHEMA", NAME, NOT_NULL),
        ("SPECIFIC_NAME", NAME, NOT_NULL),
        ("ORDINAL_POSITION", UInt64, NOT_NULL),
        ("PARAMETER_MODE", VarChar(5), NULL),
        ("PARAMETER_NAME", NAME, NULL),
        ("DATA_TYPE", Text, NULL),
        ("CHARACTER_MAXIMUM_LENGTH", Int64, NULL),
        ("CHARACTER_OCTET_LENGTH", Int64, NULL),
        ("NUMERIC_PRECISION", UInt32, NULL),
        ("NUMERIC_SCALE", Int64, NULL),
        ("DATETIME_PRECISION", UInt32, NULL),
        ("CHARACTER_SET_NAME", NAME, NULL),
        ("COLLATION_NAME", NAME, NULL),
        ("DTD_IDENTIFIER", Text, NOT_NULL),
        ("ROUTINE_TYPE", VarChar(9), NOT_NULL),
    ])
}

pub fn enabled_roles() -> Schema {
    build(&[
        ("ROLE_NAME", VarChar(255), NULL),
        ("ROLE_HOST", VarChar(255), NULL),
        ("IS_DEFAULT", YES_NO, NULL),
        ("IS_MANDATORY", YES_NO, NOT_NULL),
    ])
}

/// Shared by APPLICABLE_ROLES and ADMINISTRABLE_ROLE_AUTHORIZATIONS.
pub fn role_authorizations() -> Schema {
    build(&[
        ("USER", VarChar(97), NULL),
        ("HOST", VarChar(256), NULL),
        ("GRANTEE", VarChar(97), NULL),
        ("GRANTEE_HOST", VarChar(256), NULL),
        ("ROLE_NAME", VarChar(255), NULL),
        ("ROLE_HOST", VarChar(255), NULL),
        ("IS_GRANTABLE", YES_NO, NOT_NULL),
        ("IS_DEFAULT", YES_NO, NULL),
        ("IS_MANDATORY", YES_NO, NOT_NULL),
    ])
}

pub fn role_table_grants() -> Schema {
    build(&[
        ("GRANTOR", VarChar(97), NULL),
        ("GRANTOR_HOST", VarChar(256), NULL),
        ("GRANTEE", Char(32), NOT_NULL),
        ("GRANTEE_HOST", Char(255), NOT_NULL),
        ("TABLE_CATALOG", VarChar(3), NOT_NULL),
        ("TABLE_SCHEMA", Char(64), NOT_NULL),
        ("TABLE_NAME", Char(64), NOT_NULL),
        ("PRIVILEGE_TYPE", Text, NOT_NULL),
        ("IS_GRANTABLE", YES_NO, NOT_NULL),
    ])
}

pub fn role_column_grants() -> Schema {
    build(&[
        ("GRANTOR", VarChar(97), NULL),
        ("GRANTOR_HOST", VarChar(256), NULL),
        ("GRANTEE", Char(32), NOT_NULL),
        ("GRANTEE_HOST", Char(255), NOT_NULL),
        ("TABLE_CATALOG", VarChar(3), NOT_NULL),
        ("TABLE_SCHEMA", Char(64), NOT_NULL),
        ("TABLE_NAME", Char(64), NOT_NULL),
        ("COLUMN_NAME", Char(64), NOT_NULL),
        ("PRIVILEGE_TYPE", Text, NOT_NULL),
        ("IS_GRANTABLE", YES_NO, NOT_NULL),
    ])
}

pub fn role_routine_grants() -> Schema {
    build(&[
        ("GRANTOR", VarChar(97), NULL),
        ("GRANTOR_HOST", VarChar(256), NULL),
        ("GRANTEE", Char(32), NOT_NULL),
        ("GRANTEE_HOST", Char(255), NOT_NULL),
        ("SPECIFIC_CATALOG", VarChar(3), NOT_NULL),
        ("SPECIFIC_SCHEMA", Char(64), NOT_NULL),
        ("SPECIFIC_NAME", Char(64), NOT_NULL),
        ("ROUTINE_CATALOG", VarChar(3), NOT_NULL),
        ("ROUTINE_SCHEMA", Char(64), NOT_NULL),
        ("ROUTINE_NAME", Char(64), NOT_NULL),
        ("PRIVILEGE_TYPE", Text, NOT_NULL),
        ("IS_GRANTABLE", YES_NO, NOT_NULL),
    ])
}

pub fn st_spatial_reference_systems() -> Schema {
    build(&[
        ("SRS_NAME", VarChar(80), NOT_NULL),
        ("SRS_ID", UInt32, NOT_NULL),
        ("ORGANIZATION", VarChar(256), NULL),
        ("ORGANIZATION_COORDSYS_ID", UInt32, NULL),
        ("DEFINITION", VarChar(4096), NOT_NULL),
        ("DESCRIPTION", VarChar(2048), NULL),
    ])
}

pub fn st_units_of_measure() -> Schema {
    build(&[
        ("UNIT_NAME", VarChar(255), NULL),
        ("UNIT_TYPE", VarChar(7), NULL),
        ("CONVERSION_FACTOR", Float64, NULL),
        ("DESCRIPTION", VarChar(255), NULL),
    ])
}

pub fn st_geometry_columns() -> Schema {
    build(&[
        ("TABLE_CATALOG", NAME, NOT_NULL),
        ("TABLE_SCHEMA", NAME, NOT_NULL),
        ("TABLE_NAME", NAME, NOT_NULL),
        ("COLUMN_NAME", NAME, NULL),
        ("SRS_NAME", VarChar(80), NULL),
        ("SRS_ID", UInt32, NULL),
        ("GEOMETRY_TYPE_NAME", Text, NULL),
    ])
}

pub fn tables_extensions() -> Schema {
    build(&[
        ("TABLE_CATALOG", NAME, NOT_NULL),
        ("TABLE_SCHEMA", NAME, NOT_NULL),
        ("TABLE_NAME", NAME, NOT_NULL),
        ("ENGINE_ATTRIBUTE", Json, NULL),
        ("SECONDARY_ENGINE_ATTRIBUTE", Json, NULL),
    ])
}

pub fn columns_extensions() -> Schema {
    build(&[
        ("TABLE_CATALOG", NAME, NOT_NULL),
        ("TABLE_SCHEMA", NAME, NOT_NULL),
        ("TABLE_NAME", NAME, NOT_NULL),
        ("COLUMN_NAME", NAME, NULL),
        ("ENGINE_ATTRIBUTE", Json, NULL),
        ("SECONDARY_ENGINE_ATTRIBUTE", Json, NULL),
    ])
}

pub fn table_constraints_extensions() -> Schema {
    build(&[
        ("CONSTRAINT_CATALOG", NAME, NOT_NULL),
        ("CONSTRAINT_SCHEMA", NAME, NOT_NULL),
        ("CONSTRAINT_NAME", NAME, NOT_NULL),
        ("TABLE_NAME", NAME, NOT_NULL),
        ("ENGINE_ATTRIBUTE", Json, NULL),
        ("SECONDARY_ENGINE_ATTRIBUTE", Json, NULL),
    ])
}

pub fn schemata_extensions() -> Schema {
    build(&[
        ("CATALOG_NAME", NAME, NOT_NULL),
        ("SCHEMA_NAME", NAME, NOT_NULL),
        ("OPTIONS", VarChar(256), NULL),
    ])
}

pub fn tablespaces() -> Schema {
    build(&[
        ("TABLESPACE_NAME", NAME, NOT_NULL),
        ("ENGINE", NAME, NOT_NULL),
        ("TABLESPACE_TYPE", NAME, NULL),
        ("LOGFILE_GROUP_NAME", NAME, NULL),
        ("EXTENT_SIZE", UInt64, NULL),
        ("AUTOEXTEND_SIZE", UInt64, NULL),
        ("MAXIMUM_SIZE", UInt64, NULL),
        ("NODEGROUP_ID", UInt64, NULL),
        ("TABLESPACE_COMMENT", VarChar(2048), NULL),
    ])
}

pub fn optimizer_trace() -> Schema {
    build(&[
        ("QUERY", VarChar(65535), NOT_NULL),
        ("TRACE", VarChar(65535), NOT_NULL),
        ("MISSING_BYTES_BEYOND_MAX_MEM_SIZE", Int32, NOT_NULL),
        ("INSUFFICIENT_PRIVILEGES", Int8, NOT_NULL),
    ])
}

pub fn profiling() -> Schema {
    build(&[
        ("QUERY_ID", Int32, NOT_NULL),
        ("SEQ", Int32, NOT_NULL),
        ("STATE", VarChar(30), NOT_NULL),
        ("DURATION", Decimal { precision: 9, scale: 6 }, NOT_NULL),
        ("CPU_USER", Decimal { precision: 9, scale: 6 }, NULL),
        ("CPU_SYSTEM", Decimal { precision: 9, scale: 6 }, NULL),
        ("CONTEXT_VOLUNTARY", Int32, NULL),
        ("CONTEXT_INVOLUNTARY", Int32, NULL),
        ("BLOCK_OPS_IN", Int32, NULL),
        ("BLOCK_OPS_OUT", Int32, NULL),
        ("MESSAGES_SENT", Int32, NULL),
        ("MESSAGES_RECEIVED", Int32, NULL),
        ("PAGE_FAULTS_MAJOR", Int32, NULL),
        ("PAGE_FAULTS_MINOR", Int32, NULL),
        ("SWAPS", Int32, NULL),
        ("SOURCE_FUNCTION", VarChar(30), NULL),
        ("SOURCE_FILE", VarChar(20), NULL),
        ("SOURCE_LINE", Int32, NULL),
    ])
}

pub fn user_attributes() -> Schema {
    build(&[
        ("USER", Char(32), NOT_NULL),
        ("HOST", Char(255), NOT_NULL),
        ("ATTRIBUTE", Text, NULL),
    ])
}

pub fn view_table_usage() -> Schema {
    build(&[
        ("VIEW_CATALOG", NAME, NOT_NULL),
        ("VIEW_SCHEMA", NAME, NOT_NULL),
        ("VIEW_NAME", NAME, NOT_NULL),
        ("TABLE_CATALOG", NAME, NOT_NULL),
        ("TABLE_SCHEMA", NAME, NOT_NULL),
        ("TABLE_NAME", NAME, NOT_NULL),
    ])
}

pub fn view_routine_usage() -> Schema {
    build(&[
        ("TABLE_CATALOG", NAME, NOT_NULL),
        ("TABLE_SCHEMA", NAME, NOT_NULL),
        ("TABLE_NAME", NAME, NOT_NULL),
        ("SPECIFIC_CATALOG", NAME, NOT_NULL),
        ("SPECIFIC_SCHEMA", NAME, NOT_NULL),
        ("SPECIFIC_NAME", NAME, NOT_NULL),
    ])
}

pub fn innodb_temp_table_info() -> Schema {
    build(&[
        ("TABLE_ID", UInt64, NOT_NULL),
        ("NAME", VarChar(202), NULL),
        ("N_COLS", UInt32, NOT_NULL),
        ("SPACE", UInt32, NOT_NULL),
    ])
}

pub fn innodb_tablespaces_brief() -> Schema {
    build(&[
        ("SPACE", UInt32, NOT_NULL),
        ("NAME", VarChar(268), NOT_NULL),
        ("PATH", VarChar(512), NOT_NULL),
        ("FLAG", UInt32, NOT_NULL),
        ("SPACE_TYPE", VarChar(7), NOT_NULL),
    ])
}

pub fn innodb_cmp() -> Schema {
    build(&[
        ("PAGE_SIZE", Int32, NOT_NULL),
        ("COMPRESS_OPS", Int32, NOT_NULL),
        ("COMPRESS_OPS_OK", Int32, NOT_NULL),
        ("COMPRESS_TIME", Int32, NOT_NULL),
        ("UNCOMPRESS_OPS", Int32, NOT_NULL),
        ("UNCOMPRESS_TIME", Int32, NOT_NULL),
    ])
}

pub fn innodb_ft_config() -> Schema {
    build(&[("KEY", VarChar(193), NOT_NULL), ("VALUE", VarChar(193), NOT_NULL)])
}

pub fn innodb_ft_default_stopword() -> Schema {
    build(&[("value", VarChar(18), NOT_NULL)])
}
