extern crate natural_spline;

use natural_spline::Curve;

fn main() {

    let knots = vec![
        (0.0, 1.0),
        (1.0, -1.0),
        (2.0, 0.0),
        (4.0, 3.0)
    ];

    let curve = Curve::new(knots).unwrap();
    let (x_min, x_max) = curve.domain();

    let x_start = x_min - 1.0;
    let x_end = x_max + 1.0;
    let number_of_steps = 60;
    let step = (x_end - x_start) / number_of_steps as f64;

    println!("x;y;dy");
    for i in 0..=number_of_steps {
        let x = x_start + step * i as f64;
        println!("{:.2};{:.2};{:.2}", x, curve.value(x), curve.derivative(x));
    }
}
