//! Defaults resolver
//!
//! Turns a [`FeatureRecord`] into a [`ResolvedConfig`]. Fields are resolved
//! in dependency order: later defaults are derived from earlier choices, and
//! the first violated rule aborts resolution with a [`ConfigError`].

use log::{debug, warn};

use crate::config::ResolvedConfig;
use crate::error::{ConfigError, DimensionKind};
use crate::features::{
    ArrOrder, Density, DictFormat, Dim, ElementType, ErrFlag, Format, Literal, Malloc, OptFlag,
    Shape,
};
use crate::parser::{parse, FeatureRecord};
use crate::spec::{DimSpec, MatrixSpec};
use crate::validation::format::{
    default_format, density_for_format, validate_density, validate_format_for_shape,
};

pub const DEFAULT_ELEMENT_TYPE: ElementType = ElementType::F64;
pub const DEFAULT_INDEX_TYPE: ElementType = ElementType::U32;
pub const DEFAULT_RATIO: f64 = 0.1;
pub const DEFAULT_GROWING: f64 = 0.25;
pub const DEFAULT_HASH_WIDTH: usize = 1013;
pub const DEFAULT_SIZE: usize = 100;

/// Parse and resolve a specification tree
pub fn resolve_spec(spec: &MatrixSpec) -> Result<ResolvedConfig, ConfigError> {
    resolve(&parse(spec))
}

/// Resolve every unspecified field of `record`
pub fn resolve(record: &FeatureRecord) -> Result<ResolvedConfig, ConfigError> {
    let element_type = record.element_type.unwrap_or(DEFAULT_ELEMENT_TYPE);
    let index_type = record.index_type.unwrap_or(DEFAULT_INDEX_TYPE);
    if !index_type.is_integral() {
        return Err(ConfigError::IndexTypeNotIntegral);
    }

    let (shape, scalar_value) = resolve_shape(record)?;

    let density = match record.density {
        Some(density) => density,
        None => {
            let density = density_for_format(record.format).unwrap_or(Density::Dense);
            debug!("density derived as {density}");
            density
        }
    };

    let ratio = record.ratio.unwrap_or(Literal::new(DEFAULT_RATIO));
    let growing = record.growing.unwrap_or(Literal::new(DEFAULT_GROWING));
    if !(ratio.value().is_finite() && ratio.value() > 0.0) {
        return Err(ConfigError::InvalidGrowth);
    }
    if !(growing.value().is_finite() && growing.value() >= 0.0) {
        return Err(ConfigError::InvalidGrowth);
    }

    let malloc = record.malloc.unwrap_or(Malloc::Dynamic);
    let opt_flag = record.opt_flag.unwrap_or(OptFlag::Space);
    let err_flag = record.err_flag.unwrap_or(ErrFlag::CheckAsDefault);
    let check_default = err_flag == ErrFlag::CheckAsDefault;
    let malloc_err_checking = record.malloc_err_checking.unwrap_or(check_default);
    let bounds_checking = record.bounds_checking.unwrap_or(check_default);
    let compat_checking = record.compat_checking.unwrap_or(check_default);

    let format = match record.format {
        Some(format) => Some(format),
        None => {
            let format = default_format(shape, density, opt_flag);
            if let Some(format) = format {
                debug!("format derived as {format} for {density} {shape}");
            }
            format
        }
    };
    validate_format_for_shape(shape, format)?;
    if let Some(format) = format {
        validate_density(density, format)?;
    }

    let dict_format = record.dict_format.unwrap_or(DictFormat::Hash);
    let hash_width = record.hash_width.unwrap_or(DEFAULT_HASH_WIDTH);
    if hash_width == 0 {
        return Err(ConfigError::ZeroHashWidth);
    }
    let arr_order = record.arr_order.unwrap_or(ArrOrder::RowMajor);

    let (rows, cols, order) = if shape == Shape::Rect {
        (
            resolve_dim(record.rows, DimensionKind::Rows)?,
            resolve_dim(record.cols, DimensionKind::Cols)?,
            Dim::Dynamic,
        )
    } else {
        (
            Dim::Dynamic,
            Dim::Dynamic,
            resolve_dim(record.order, DimensionKind::Order)?,
        )
    };

    let diags = if shape.is_banded() {
        match resolve_dim(record.diags, DimensionKind::Diags)? {
            Dim::Static(count) if shape == Shape::BandDiag => {
                let odd = 2 * (count / 2) + 1;
                if odd != count {
                    warn!("band diagonal count {count} rounded to {odd}");
                }
                Dim::Static(odd)
            }
            diags => diags,
        }
    } else {
        Dim::Dynamic
    };

    let size = match record.size {
        Some(size) => size,
        None => default_size(format, rows, cols, order),
    };
    if malloc == Malloc::Fixed && size == 0 {
        return Err(ConfigError::ZeroFixedSize);
    }

    let config = ResolvedConfig {
        element_type,
        index_type,
        shape,
        density,
        ratio,
        growing,
        malloc,
        size,
        malloc_err_checking,
        opt_flag,
        err_flag,
        bounds_checking,
        compat_checking,
        format,
        dict_format,
        hash_width,
        arr_order,
        rows,
        cols,
        order,
        diags,
        scalar_value,
    };
    debug!("resolved configuration {config}");
    Ok(config)
}

/// Shape with its scalar value; scalars with a static 0 or 1 collapse to
/// the zero and identity shapes
fn resolve_shape(record: &FeatureRecord) -> Result<(Shape, Dim<Literal>), ConfigError> {
    let shape = record.shape.unwrap_or(Shape::Rect);
    let resolved = match shape {
        Shape::Scalar => {
            let value = match record.scalar_value {
                None | Some(DimSpec::Dynamic) => Dim::Dynamic,
                Some(DimSpec::Static(None)) => return Err(ConfigError::ScalarValueNotSpecified),
                Some(DimSpec::Static(Some(value))) => Dim::Static(value),
            };
            match value {
                Dim::Static(v) if v.value() == 0.0 => (Shape::Zero, Dim::Static(Literal::new(0.0))),
                Dim::Static(v) if v.value() == 1.0 => (Shape::Ident, Dim::Static(Literal::new(1.0))),
                value => (Shape::Scalar, value),
            }
        }
        Shape::Zero => (Shape::Zero, Dim::Static(Literal::new(0.0))),
        Shape::Ident => (Shape::Ident, Dim::Static(Literal::new(1.0))),
        other => (other, Dim::Dynamic),
    };
    if resolved.0 != shape {
        debug!("scalar shape rewritten to {}", resolved.0);
    }
    Ok(resolved)
}

fn resolve_dim(spec: Option<DimSpec<usize>>, kind: DimensionKind) -> Result<Dim<usize>, ConfigError> {
    match spec {
        None | Some(DimSpec::Dynamic) => Ok(Dim::Dynamic),
        Some(DimSpec::Static(None)) => Err(ConfigError::DimensionNotSpecified(kind)),
        Some(DimSpec::Static(Some(0))) => Err(ConfigError::NonPositiveDimension(kind)),
        Some(DimSpec::Static(Some(value))) => Ok(Dim::Static(value)),
    }
}

fn default_size(format: Option<Format>, rows: Dim<usize>, cols: Dim<usize>, order: Dim<usize>) -> usize {
    if format != Some(Format::Array) {
        return DEFAULT_SIZE;
    }
    match (rows, cols, order) {
        (Dim::Static(rows), Dim::Static(cols), _) => rows.max(cols),
        (_, _, Dim::Static(order)) => order,
        _ => DEFAULT_SIZE,
    }
}
