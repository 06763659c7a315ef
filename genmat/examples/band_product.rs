//! Builds two banded matrices, multiplies them lazily and prints the result
//!
//! Run with `RUST_LOG=genmat=trace` to see which storage formats and kernels
//! are selected.

use genmat::{
    DensitySpec, DimSpec, Evaluate, FormatSpec, MatrixArgs, MatrixGenerator, MatrixSpec, Shape,
    ShapeSpec,
};

fn main() -> genmat::Result<()> {
    env_logger::init();

    let mut generator = MatrixGenerator::new();

    println!("=== Band Product Demo ===\n");

    // Tridiagonal, stored one dense column per diagonal
    let tridiagonal = generator.generate::<f64>(
        &MatrixSpec::new()
            .with_shape(
                ShapeSpec::new(Shape::BandDiag)
                    .with_format(FormatSpec::Dia)
                    .with_diags(DimSpec::fixed(3)),
            )
            .with_density(DensitySpec::sparse()),
    )?;
    println!("1. Matrix type: {}", tridiagonal.config());

    let mut a = tridiagonal.create(MatrixArgs::new().with_order(6))?;
    for i in 0..6 {
        a.set_element(i, i, 2.0)?;
        if i + 1 < 6 {
            a.set_element(i, i + 1, -1.0)?;
            a.set_element(i + 1, i, -1.0)?;
        }
    }
    println!("   {} nonzeros on diagonals {}..={}", a.nnz(), a.first_diag(), a.last_diag());

    // Lower bidiagonal, skyline storage
    let lower = generator.generate::<f32>(
        &MatrixSpec::new()
            .with_shape(ShapeSpec::new(Shape::LowerBandTriang).with_format(FormatSpec::Sky))
            .with_density(DensitySpec::sparse()),
    )?;
    let l = lower.create(MatrixArgs::new().with_order(6).with_diags(2).with_value(1.0))?;
    println!("2. Matrix type: {}", lower.config());

    let product = (&a * &l)?;
    println!("\n3. Lazy product: {}", genmat::MatrixExpr::config(&product));
    let result = product.evaluate()?;
    println!(
        "   evaluated: {} diagonals, {} nonzeros",
        result.diags(),
        result.nnz()
    );

    println!("\n4. Nonzero entries:");
    for (row, col, value) in result.cursor() {
        println!("   ({row}, {col}) = {value}");
    }
    Ok(())
}
