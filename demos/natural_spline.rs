extern crate natural_spline;

use natural_spline::Curve;

fn main() {

    // mirror-symmetric knots, the peak lies between the two middle knots
    let knots = vec![
        (0.0, 0.0),
        (1.0, 1.0),
        (2.0, 1.0),
        (3.0, 0.0)
    ];

    let curve = Curve::new(knots).unwrap();
    let (x_min, x_max) = curve.domain();

    let ((min_x, min_y), (max_x, max_y)) = curve.min_max();
    println!("# min ({:.3}, {:.3}), max ({:.3}, {:.3})", min_x, min_y, max_x, max_y);

    let number_of_steps = 30;
    let step = (x_max - x_min) / number_of_steps as f64;

    println!("x;y");
    for i in 0..=number_of_steps {
        let x = x_min + step * i as f64;
        println!("{:.2};{:.3}", x, curve.value(x));
    }
}
