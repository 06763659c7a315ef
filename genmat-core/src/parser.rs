//! Feature parser
//!
//! Flattens a nested [`MatrixSpec`] into a [`FeatureRecord`] where every
//! configurable aspect is an explicit field. Sub-features that do not apply to
//! the chosen shape or format are dropped here, so the resolver only ever sees
//! meaningful values.

use crate::features::{
    ArrOrder, Density, DictFormat, ElementType, ErrFlag, Format, Literal, Malloc, OptFlag, Shape,
};
use crate::spec::{DensitySpec, DictSpec, DimSpec, FormatSpec, MallocSpec, MatrixSpec};

/// Flat description with one optional field per feature
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeatureRecord {
    pub element_type: Option<ElementType>,
    pub index_type: Option<ElementType>,
    pub shape: Option<Shape>,
    pub density: Option<Density>,
    pub ratio: Option<Literal>,
    pub growing: Option<Literal>,
    pub malloc: Option<Malloc>,
    pub size: Option<usize>,
    pub malloc_err_checking: Option<bool>,
    pub opt_flag: Option<OptFlag>,
    pub err_flag: Option<ErrFlag>,
    pub bounds_checking: Option<bool>,
    pub compat_checking: Option<bool>,
    pub format: Option<Format>,
    pub dict_format: Option<DictFormat>,
    pub hash_width: Option<usize>,
    pub arr_order: Option<ArrOrder>,
    pub rows: Option<DimSpec<usize>>,
    pub cols: Option<DimSpec<usize>>,
    pub order: Option<DimSpec<usize>>,
    pub diags: Option<DimSpec<usize>>,
    pub scalar_value: Option<DimSpec<Literal>>,
}

/// Flatten a specification tree
pub fn parse(spec: &MatrixSpec) -> FeatureRecord {
    let mut record = FeatureRecord {
        element_type: spec.element_type,
        index_type: spec.index_type,
        opt_flag: spec.opt_flag,
        err_flag: spec.err_flag,
        bounds_checking: spec.bounds_checking,
        compat_checking: spec.compat_checking,
        ..FeatureRecord::default()
    };

    let Some(structure) = spec.structure else {
        return record;
    };

    match structure.density {
        Some(DensitySpec::Dense) => record.density = Some(Density::Dense),
        Some(DensitySpec::Sparse { ratio, growing }) => {
            record.density = Some(Density::Sparse);
            record.ratio = ratio;
            record.growing = growing;
        }
        None => {}
    }

    match structure.malloc {
        Some(MallocSpec::Fixed { size }) => {
            record.malloc = Some(Malloc::Fixed);
            record.size = size;
        }
        Some(MallocSpec::Dynamic { check_errors }) => {
            record.malloc = Some(Malloc::Dynamic);
            record.malloc_err_checking = check_errors;
        }
        None => {}
    }

    let Some(shape) = structure.shape else {
        return record;
    };
    record.shape = Some(shape.kind);

    if let Some(format) = shape.format {
        parse_format(&mut record, format);
    }

    if shape.kind == Shape::Rect {
        record.rows = shape.rows;
        record.cols = shape.cols;
    } else {
        record.order = shape.order;
    }
    if shape.kind.is_banded() {
        record.diags = shape.diags;
    }
    if shape.kind == Shape::Scalar {
        record.scalar_value = shape.value;
    }

    record
}

fn parse_format(record: &mut FeatureRecord, format: FormatSpec) {
    record.format = Some(match format {
        FormatSpec::Array { order } => {
            record.arr_order = order;
            Format::Array
        }
        FormatSpec::Vector => Format::Vector,
        FormatSpec::Csr => Format::Csr,
        FormatSpec::Csc => Format::Csc,
        FormatSpec::Coo { dict } => {
            match dict {
                Some(DictSpec::Hash { width }) => {
                    record.dict_format = Some(DictFormat::Hash);
                    record.hash_width = width;
                }
                Some(DictSpec::List) => record.dict_format = Some(DictFormat::List),
                None => {}
            }
            Format::Coo
        }
        FormatSpec::Dia => Format::Dia,
        FormatSpec::Sky => Format::Sky,
    });
}
