extern crate natural_spline;

use natural_spline::{Curve, CurveError, Knot};

fn main() -> Result<(), CurveError> {

    let base = Curve::new(vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 4.0)])?;
    let dip = base.add_knot(Knot::new(1.5, -1.0));
    let tail = Curve::new(vec![(3.0, 2.0), (4.0, 0.0), (5.0, 1.0)])?;

    let combined = (&dip + &tail)?;
    println!("combined knots: {:?}", combined.get_knots());

    let ((min_x, min_y), (max_x, max_y)) = combined.min_max();
    println!("min: ({:.3}, {:.3}), max: ({:.3}, {:.3})", min_x, min_y, max_x, max_y);

    let restored = (&combined - &tail)?;
    println!("after difference: {:?}", restored.get_knots());

    match &tail - &combined {
        Ok(curve) => println!("unexpected curve: {:?}", curve.get_knots()),
        Err(err) => println!("expected failure: {}", err),
    }

    Ok(())
}
