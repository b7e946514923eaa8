// src/codec.rs
//
// Parquet <-> TableData. Decoding maps each Arrow column type onto a
// ColumnDataType and renders every value to its canonical text; encoding
// parses the text back into typed arrays under the original schema, so a
// decode -> encode round trip reproduces the stored table.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array, Int64Array,
    Int8Array, StringArray, UInt16Array, UInt32Array, UInt64Array, UInt8Array,
};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use thiserror::Error;

use crate::table::definitions::{ColumnDataType, ColumnSpec, TableData};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType { column: String, data_type: DataType },
    #[error("column '{column}' data does not match its declared type")]
    ColumnMismatch { column: String },
    #[error("cell at row {row}, column '{column}' is not a valid {expected}: '{value}'")]
    Parse {
        row: usize,
        column: String,
        expected: ColumnDataType,
        value: String,
    },
    #[error("cannot encode a table with no columns")]
    NoColumns,
}

/// Decodes a Parquet blob into an in-memory table.
pub fn decode(bytes: Bytes) -> Result<TableData, CodecError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(bytes)?;
    let schema = builder.schema().clone();

    let mut columns = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let data_type = column_type_from_arrow(field.data_type()).ok_or_else(|| {
            CodecError::UnsupportedColumnType {
                column: field.name().clone(),
                data_type: field.data_type().clone(),
            }
        })?;
        columns.push(ColumnSpec {
            header: field.name().clone(),
            data_type,
        });
    }

    let reader = builder.build()?;
    let mut grid = Vec::new();
    for batch in reader {
        let batch = batch?;
        for row in 0..batch.num_rows() {
            let mut cells = Vec::with_capacity(columns.len());
            for (col_idx, spec) in columns.iter().enumerate() {
                cells.push(format_cell(batch.column(col_idx), row, spec)?);
            }
            grid.push(cells);
        }
    }

    Ok(TableData { columns, grid })
}

/// Encodes an in-memory table back into a Parquet blob.
pub fn encode(table: &TableData) -> Result<Vec<u8>, CodecError> {
    if table.columns.is_empty() {
        return Err(CodecError::NoColumns);
    }

    let fields: Vec<Field> = table
        .columns
        .iter()
        .map(|spec| Field::new(spec.header.clone(), arrow_type_of(spec.data_type), true))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(table.columns.len());
    for (col_idx, spec) in table.columns.iter().enumerate() {
        arrays.push(build_column(table, col_idx, spec)?);
    }

    let batch = RecordBatch::try_new(schema.clone(), arrays)?;
    let mut buffer = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buffer, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(buffer)
}

fn column_type_from_arrow(data_type: &DataType) -> Option<ColumnDataType> {
    match data_type {
        DataType::Utf8 => Some(ColumnDataType::String),
        DataType::Boolean => Some(ColumnDataType::Bool),
        DataType::Int8 => Some(ColumnDataType::I8),
        DataType::Int16 => Some(ColumnDataType::I16),
        DataType::Int32 => Some(ColumnDataType::I32),
        DataType::Int64 => Some(ColumnDataType::I64),
        DataType::UInt8 => Some(ColumnDataType::U8),
        DataType::UInt16 => Some(ColumnDataType::U16),
        DataType::UInt32 => Some(ColumnDataType::U32),
        DataType::UInt64 => Some(ColumnDataType::U64),
        DataType::Float32 => Some(ColumnDataType::F32),
        DataType::Float64 => Some(ColumnDataType::F64),
        _ => None,
    }
}

fn arrow_type_of(data_type: ColumnDataType) -> DataType {
    match data_type {
        ColumnDataType::String => DataType::Utf8,
        ColumnDataType::Bool => DataType::Boolean,
        ColumnDataType::I8 => DataType::Int8,
        ColumnDataType::I16 => DataType::Int16,
        ColumnDataType::I32 => DataType::Int32,
        ColumnDataType::I64 => DataType::Int64,
        ColumnDataType::U8 => DataType::UInt8,
        ColumnDataType::U16 => DataType::UInt16,
        ColumnDataType::U32 => DataType::UInt32,
        ColumnDataType::U64 => DataType::UInt64,
        ColumnDataType::F32 => DataType::Float32,
        ColumnDataType::F64 => DataType::Float64,
    }
}

fn downcast<'a, T: 'static>(array: &'a ArrayRef, column: &str) -> Result<&'a T, CodecError> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| CodecError::ColumnMismatch {
            column: column.to_string(),
        })
}

fn format_cell(
    array: &ArrayRef,
    row: usize,
    spec: &ColumnSpec,
) -> Result<Option<String>, CodecError> {
    if array.is_null(row) {
        return Ok(None);
    }
    let column = spec.header.as_str();
    let text = match spec.data_type {
        ColumnDataType::String => downcast::<StringArray>(array, column)?.value(row).to_string(),
        ColumnDataType::Bool => downcast::<BooleanArray>(array, column)?.value(row).to_string(),
        ColumnDataType::I8 => downcast::<Int8Array>(array, column)?.value(row).to_string(),
        ColumnDataType::I16 => downcast::<Int16Array>(array, column)?.value(row).to_string(),
        ColumnDataType::I32 => downcast::<Int32Array>(array, column)?.value(row).to_string(),
        ColumnDataType::I64 => downcast::<Int64Array>(array, column)?.value(row).to_string(),
        ColumnDataType::U8 => downcast::<UInt8Array>(array, column)?.value(row).to_string(),
        ColumnDataType::U16 => downcast::<UInt16Array>(array, column)?.value(row).to_string(),
        ColumnDataType::U32 => downcast::<UInt32Array>(array, column)?.value(row).to_string(),
        ColumnDataType::U64 => downcast::<UInt64Array>(array, column)?.value(row).to_string(),
        ColumnDataType::F32 => downcast::<Float32Array>(array, column)?.value(row).to_string(),
        ColumnDataType::F64 => downcast::<Float64Array>(array, column)?.value(row).to_string(),
    };
    Ok(Some(text))
}

fn build_column(table: &TableData, col_idx: usize, spec: &ColumnSpec) -> Result<ArrayRef, CodecError> {
    let array: ArrayRef = match spec.data_type {
        ColumnDataType::String => {
            let values: Vec<Option<String>> = table
                .grid
                .iter()
                .map(|row| row.get(col_idx).cloned().flatten())
                .collect();
            Arc::new(StringArray::from(values))
        }
        ColumnDataType::Bool => Arc::new(BooleanArray::from(collect_parsed::<bool>(table, col_idx, spec)?)),
        ColumnDataType::I8 => Arc::new(Int8Array::from(collect_parsed::<i8>(table, col_idx, spec)?)),
        ColumnDataType::I16 => Arc::new(Int16Array::from(collect_parsed::<i16>(table, col_idx, spec)?)),
        ColumnDataType::I32 => Arc::new(Int32Array::from(collect_parsed::<i32>(table, col_idx, spec)?)),
        ColumnDataType::I64 => Arc::new(Int64Array::from(collect_parsed::<i64>(table, col_idx, spec)?)),
        ColumnDataType::U8 => Arc::new(UInt8Array::from(collect_parsed::<u8>(table, col_idx, spec)?)),
        ColumnDataType::U16 => Arc::new(UInt16Array::from(collect_parsed::<u16>(table, col_idx, spec)?)),
        ColumnDataType::U32 => Arc::new(UInt32Array::from(collect_parsed::<u32>(table, col_idx, spec)?)),
        ColumnDataType::U64 => Arc::new(UInt64Array::from(collect_parsed::<u64>(table, col_idx, spec)?)),
        ColumnDataType::F32 => Arc::new(Float32Array::from(collect_parsed::<f32>(table, col_idx, spec)?)),
        ColumnDataType::F64 => Arc::new(Float64Array::from(collect_parsed::<f64>(table, col_idx, spec)?)),
    };
    Ok(array)
}

fn collect_parsed<T: std::str::FromStr>(
    table: &TableData,
    col_idx: usize,
    spec: &ColumnSpec,
) -> Result<Vec<Option<T>>, CodecError> {
    let mut values = Vec::with_capacity(table.grid.len());
    for (row_idx, row) in table.grid.iter().enumerate() {
        match row.get(col_idx).and_then(|c| c.as_deref()) {
            None => values.push(None),
            Some(text) => {
                let parsed = text.trim().parse::<T>().map_err(|_| CodecError::Parse {
                    row: row_idx,
                    column: spec.header.clone(),
                    expected: spec.data_type,
                    value: text.to_string(),
                })?;
                values.push(Some(parsed));
            }
        }
    }
    Ok(values)
}
